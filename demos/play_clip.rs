use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};

use binaural_rs::{BitDepth, ClipLength, ClipService, GenerationRequest};

const FREQUENCY_HZ: f64 = 200.0;
const BEAT_HZ: f64 = 4.0;
const SHIFT_DEG: f64 = 180.0;
const PLAY_SECONDS: u64 = 10;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let host = cpal::default_host();
    let output_device = host
        .default_output_device()
        .ok_or_else(|| anyhow::anyhow!("No output device found"))?;
    let output_stream_config = output_device
        .default_output_config()
        .map_err(|e| anyhow::anyhow!("Failed to get default output config: {e}"))?;

    let sample_rate = output_stream_config.sample_rate().0;
    let device_channels = output_stream_config.channels() as usize;

    println!("Output device: {}", output_device.name()?);
    println!("Sample rate: {sample_rate} Hz, Channels: {device_channels}");

    // Synthesize at the device rate so no resampling is needed.
    let mut service = ClipService::new(sample_rate, BitDepth::Sixteen)?;
    let clip = service.generate(&GenerationRequest {
        frequency_hz: FREQUENCY_HZ,
        beat_hz: BEAT_HZ,
        phase_shift_deg: SHIFT_DEG,
        length: ClipLength::Loops(1),
    })?;

    let full_scale = clip.bit_depth().full_scale() as f32;
    let right: Vec<f32> = clip.channels()[0].iter().map(|&s| s as f32 / full_scale).collect();
    let left: Vec<f32> = clip.channels()[1].iter().map(|&s| s as f32 / full_scale).collect();

    let mut position = 0usize;
    let output_stream = output_device.build_output_stream(
        &output_stream_config.into(),
        move |data: &mut [f32], _| {
            // The clip is one seamless period per ear; loop it forever.
            for frame in data.chunks_mut(device_channels) {
                let l = left[position % left.len()];
                let r = right[position % right.len()];
                position += 1;
                for (channel, sample) in frame.iter_mut().enumerate() {
                    *sample = if channel % 2 == 0 { l } else { r };
                }
            }
        },
        move |err| eprintln!("Output stream error: {err}"),
        None,
    )?;

    output_stream.play()?;
    println!(
        "Playing a {FREQUENCY_HZ} Hz carrier with a {BEAT_HZ} Hz binaural beat for {PLAY_SECONDS} s..."
    );
    std::thread::sleep(std::time::Duration::from_secs(PLAY_SECONDS));

    Ok(())
}
