use approx::assert_abs_diff_eq;
use demucs_stems::{read_audio, write_audio, AudioData};
use tempfile::tempdir;

fn sine(frames: usize, channels: u16) -> AudioData {
    let sr = 44_100u32;
    let mut samples = Vec::with_capacity(frames * channels as usize);
    for i in 0..frames {
        let t = i as f32 / sr as f32;
        for c in 0..channels {
            samples.push((2.0 * std::f32::consts::PI * (440.0 + 220.0 * c as f32) * t).sin() * 0.5);
        }
    }
    AudioData {
        samples,
        sample_rate: sr,
        channels,
    }
}

#[test]
fn writes_16_bit_pcm_with_caller_layout() {
    let tmp = tempdir().unwrap();
    let path = tmp.path().join("test.wav");

    write_audio(&path, &sine(1000, 2)).unwrap();

    let reader = hound::WavReader::open(&path).unwrap();
    let spec = reader.spec();
    assert_eq!(spec.channels, 2);
    assert_eq!(spec.sample_rate, 44_100);
    assert_eq!(spec.bits_per_sample, 16);
    assert_eq!(spec.sample_format, hound::SampleFormat::Int);
    assert_eq!(reader.len(), 2000);
}

#[test]
fn rewriting_replaces_previous_content() {
    let tmp = tempdir().unwrap();
    let path = tmp.path().join("test.wav");

    write_audio(&path, &sine(5000, 2)).unwrap();
    write_audio(&path, &sine(100, 1)).unwrap();

    let reader = hound::WavReader::open(&path).unwrap();
    assert_eq!(reader.spec().channels, 1);
    assert_eq!(reader.len(), 100);
}

#[test]
fn out_of_range_samples_are_clamped() {
    let tmp = tempdir().unwrap();
    let path = tmp.path().join("loud.wav");
    let audio = AudioData {
        samples: vec![2.0, -3.0, 0.0],
        sample_rate: 8000,
        channels: 1,
    };

    write_audio(&path, &audio).unwrap();

    let samples: Vec<i16> = hound::WavReader::open(&path)
        .unwrap()
        .into_samples::<i16>()
        .map(|s| s.unwrap())
        .collect();
    assert_eq!(samples, [i16::MAX, i16::MIN, 0]);
}

#[test]
fn zero_channels_cannot_be_staged() {
    let tmp = tempdir().unwrap();
    let audio = AudioData {
        samples: vec![0.1, 0.2],
        sample_rate: 44_100,
        channels: 0,
    };
    assert!(write_audio(tmp.path().join("bad.wav"), &audio).is_err());
}

#[test]
fn sample_rates_hound_cannot_encode_are_rejected() {
    let tmp = tempdir().unwrap();
    for sample_rate in [0u32, 1_500_000_000, u32::MAX] {
        let audio = AudioData {
            samples: vec![0.1, 0.2],
            sample_rate,
            channels: 2,
        };
        let err = write_audio(tmp.path().join("rate.wav"), &audio).unwrap_err();
        assert!(err.to_string().contains("Hz"), "rate {sample_rate}: {err}");
    }
}

#[test]
fn native_i16_frames_survive_staging() {
    let tmp = tempdir().unwrap();
    let path = tmp.path().join("pcm.wav");
    let pcm = [0i16, 1000, -1000, i16::MAX, i16::MIN, -1, -20000, 7];

    write_audio(&path, &AudioData::from_i16(&pcm, 22_050, 2)).unwrap();

    let back: Vec<i16> = hound::WavReader::open(&path)
        .unwrap()
        .into_samples::<i16>()
        .map(|s| s.unwrap())
        .collect();
    assert_eq!(back, pcm);
}

#[test]
fn read_audio_decodes_a_staged_file() {
    let tmp = tempdir().unwrap();
    let path = tmp.path().join("roundtrip.wav");
    let original = sine(2048, 2);
    write_audio(&path, &original).unwrap();

    let decoded = read_audio(&path).unwrap();
    assert_eq!(decoded.channels, 2);
    assert_eq!(decoded.sample_rate, 44_100);
    assert_eq!(decoded.samples.len(), original.samples.len());
    assert_eq!(decoded.frames(), 2048);
    for (a, b) in decoded.samples.iter().zip(&original.samples).take(64) {
        assert_abs_diff_eq!(*a, *b, epsilon = 1e-3);
    }
}

#[test]
fn read_audio_reports_missing_file() {
    let err = read_audio("definitely/not/here.wav").unwrap_err();
    assert!(err.to_string().contains("Failed to open audio file"));
}
