use std::env;

use binaural_rs::{frequencies, ChannelLayout, ClipLength, ClipService, GenerationRequest};

// Defaults matching the classic front-end: caduceus exponent 196 carrier,
// 1 Hz beat, opposite-phase left ear, golden-ratio loop duration.
const DEFAULT_BEAT_HZ: f64 = 1.0;
const DEFAULT_SHIFT_DEG: f64 = 180.0;
const LOOPED_SAMPLE_DURATION: f64 = 1.61803;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let frequency = parse_arg(&args, 1).unwrap_or_else(|| {
        frequencies::caduceus_frequency(196).expect("preset exponent 196 exists")
    });
    let beat = parse_arg(&args, 2).unwrap_or(DEFAULT_BEAT_HZ);
    let shift = parse_arg(&args, 3).unwrap_or(DEFAULT_SHIFT_DEG);

    println!("Frequency: {frequency:.5} Hz, beat: {beat:.5} Hz, shift: {shift:.5} deg");

    let mut service = ClipService::default();
    let request = GenerationRequest {
        frequency_hz: frequency,
        beat_hz: beat,
        phase_shift_deg: shift,
        length: ClipLength::Seconds(LOOPED_SAMPLE_DURATION),
    };

    let clip = service.generate(&request)?;
    println!(
        "Generated {} samples per channel ({:.3} s at {} Hz)",
        clip.duration_samples(),
        clip.duration_seconds(),
        clip.sample_rate()
    );

    let stereo_bytes = &service.encode(&clip, ChannelLayout::Interleaved)?[0];
    println!("Stereo container: {} bytes", stereo_bytes.len());

    let out_dir = env::current_dir()?;
    let stereo = service.write_stereo(&clip, &out_dir, "binaural")?;
    println!("Wrote {}", stereo.display());

    for path in service.write_per_ear(&clip, &out_dir, &["binaural_right", "binaural_left"])? {
        println!("Wrote {}", path.display());
    }

    Ok(())
}

fn parse_arg(args: &[String], index: usize) -> Option<f64> {
    let value: f64 = args.get(index)?.parse().ok()?;
    // Fall back to the default for non-positive input instead of failing.
    (value > 0.0).then_some(value)
}
