use fastsize_core::{
    CoreError, DetectOptions, ImageSize, ImageType, LazyBuffer, detect, detect_bytes, detect_with,
};
use std::io::{self, Read};

fn bmp_fixture() -> Vec<u8> {
    let mut data = vec![0u8; 26];
    data[0] = b'B';
    data[1] = b'M';
    data[18..22].copy_from_slice(&[0x0A, 0x00, 0x00, 0x00]);
    data[22..26].copy_from_slice(&[0x05, 0x00, 0x00, 0x00]);
    data
}

fn jpeg_with_app0() -> Vec<u8> {
    vec![
        0xFF, 0xD8, // SOI
        0xFF, 0xE0, 0x00, 0x10, 0x4A, 0x46, 0x49, 0x46, 0x00, 0x01, 0x01, 0x00, 0x00, 0x01, 0x00,
        0x01, 0x00, 0x00, // APP0, length 16
        0xFF, 0xC0, 0x00, 0x0B, 0x08, 0x00, 0xF0, 0x01, 0x40, 0x01, 0x01, 0x11, 0x00, // SOF0
        0xFF, 0xD9,
    ]
}

fn tiff_ii() -> Vec<u8> {
    vec![
        b'I', b'I', 0x2A, 0x00, 0x08, 0x00, 0x00, 0x00, // header
        0x02, 0x00, // 2 entries
        0x00, 0x01, 0x03, 0x00, 0x01, 0x00, 0x00, 0x00, 0x80, 0x02, 0x00, 0x00, // width 640
        0x01, 0x01, 0x04, 0x00, 0x01, 0x00, 0x00, 0x00, 0xE0, 0x01, 0x00, 0x00, // height 480
        0x00, 0x00, 0x00, 0x00,
    ]
}

fn tiff_mm() -> Vec<u8> {
    vec![
        b'M', b'M', 0x00, 0x2A, 0x00, 0x00, 0x00, 0x08, // header
        0x00, 0x02, // 2 entries
        0x01, 0x00, 0x00, 0x03, 0x00, 0x00, 0x00, 0x01, 0x02, 0x80, 0x00, 0x00, // width 640
        0x01, 0x01, 0x00, 0x04, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x01, 0xE0, // height 480
        0x00, 0x00, 0x00, 0x00,
    ]
}

const PNG_FIXTURE: [u8; 33] = [
    0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x48, 0x44, 0x52,
    0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x00, 0x80, 0x08, 0x06, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00,
];

const GIF_FIXTURE: [u8; 13] = [
    0x47, 0x49, 0x46, 0x38, 0x39, 0x61, 0x2C, 0x01, 0xC8, 0x00, 0xF7, 0x00, 0x00,
];

const WEBP_LOSSY_FIXTURE: [u8; 30] = [
    0x52, 0x49, 0x46, 0x46, 0x24, 0x00, 0x00, 0x00, 0x57, 0x45, 0x42, 0x50, 0x56, 0x50, 0x38, 0x20,
    0x18, 0x00, 0x00, 0x00, 0x30, 0x01, 0x00, 0x9D, 0x01, 0x2A, 0x80, 0x00, 0x60, 0x00,
];

/// Counts reads and hands out at most `step` bytes per call.
struct CountingSource<'a> {
    data: &'a [u8],
    step: usize,
    reads: usize,
}

impl Read for CountingSource<'_> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.reads += 1;
        let n = buf.len().min(self.step).min(self.data.len());
        buf[..n].copy_from_slice(&self.data[..n]);
        self.data = &self.data[n..];
        Ok(n)
    }
}

struct TimeoutAfter<'a> {
    data: &'a [u8],
}

impl Read for TimeoutAfter<'_> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.data.is_empty() {
            return Err(io::Error::new(io::ErrorKind::TimedOut, "read deadline elapsed"));
        }
        let n = buf.len().min(self.data.len());
        buf[..n].copy_from_slice(&self.data[..n]);
        self.data = &self.data[n..];
        Ok(n)
    }
}

#[test]
fn test_bmp_fixture() {
    let (ty, size) = detect_bytes(&bmp_fixture()).unwrap();
    assert_eq!(ty, ImageType::Bmp);
    assert_eq!(size, ImageSize::new(10, 5));
}

#[test]
fn test_gif_fixture() {
    let (ty, size) = detect_bytes(&GIF_FIXTURE).unwrap();
    assert_eq!(ty, ImageType::Gif);
    assert_eq!(size, ImageSize::new(300, 200));
}

#[test]
fn test_jpeg_with_app0_segment() {
    let (ty, size) = detect_bytes(&jpeg_with_app0()).unwrap();
    assert_eq!(ty, ImageType::Jpeg);
    assert_eq!(size, ImageSize::new(320, 240));
}

#[test]
fn test_png_fixture() {
    let (ty, size) = detect_bytes(&PNG_FIXTURE).unwrap();
    assert_eq!(ty, ImageType::Png);
    assert_eq!(size, ImageSize::new(256, 128));
}

#[test]
fn test_tiff_byte_orders_agree() {
    let little = detect_bytes(&tiff_ii()).unwrap();
    let big = detect_bytes(&tiff_mm()).unwrap();
    assert_eq!(little, (ImageType::Tiff, ImageSize::new(640, 480)));
    assert_eq!(little, big);
}

#[test]
fn test_webp_fixture() {
    let (ty, size) = detect_bytes(&WEBP_LOSSY_FIXTURE).unwrap();
    assert_eq!(ty, ImageType::Webp);
    assert_eq!(size, ImageSize::new(128, 96));
}

#[test]
fn test_strict_mode_accepts_well_formed_fixtures() {
    let fixtures: Vec<(Vec<u8>, ImageType)> = vec![
        (bmp_fixture(), ImageType::Bmp),
        (GIF_FIXTURE.to_vec(), ImageType::Gif),
        (jpeg_with_app0(), ImageType::Jpeg),
        (PNG_FIXTURE.to_vec(), ImageType::Png),
        (tiff_ii(), ImageType::Tiff),
        (tiff_mm(), ImageType::Tiff),
        (WEBP_LOSSY_FIXTURE.to_vec(), ImageType::Webp),
    ];
    for (data, expected) in fixtures {
        let mut source = data.as_slice();
        let detection = detect_with(&mut source, &DetectOptions::strict(), 8).unwrap();
        assert_eq!(detection.image_type, expected);
    }
}

#[test]
fn test_garbage_prefix_is_unrecognized() {
    let err = detect_bytes(&[0x00, 0x01, 0x02, 0x03]).unwrap_err();
    assert_eq!(err.image_type(), ImageType::Unknown);
    assert!(matches!(
        err.kind(),
        CoreError::UnrecognizedFormat { magic: [0x00, 0x01] }
    ));
}

#[test]
fn test_truncated_png_is_insufficient_data() {
    for len in 2..24 {
        let err = detect_bytes(&PNG_FIXTURE[..len]).unwrap_err();
        assert_eq!(err.image_type(), ImageType::Png);
        assert!(
            matches!(err.kind(), CoreError::InsufficientData { available, .. } if *available == len as u64),
            "len {len}: {err}"
        );
    }
}

#[test]
fn test_jpeg_reads_stop_at_frame_header() {
    let mut data = jpeg_with_app0();
    data.extend(std::iter::repeat_n(0xAB, 1 << 16));
    let mut source = CountingSource {
        data: &data,
        step: 4,
        reads: 0,
    };
    let detection = detect_with(&mut source, &DetectOptions::default(), 1).unwrap();
    assert_eq!(detection.size, ImageSize::new(320, 240));
    // SOF0 starts at 20; its width field ends at 29.
    assert_eq!(detection.bytes_read, 29);
    assert_eq!(source.reads, 10);
}

#[test]
fn test_overlapping_buffer_reads() {
    let data: Vec<u8> = (0..20).collect();
    let mut source = CountingSource {
        data: &data,
        step: 3,
        reads: 0,
    };
    {
        let mut buffer = LazyBuffer::new(&mut source);
        assert_eq!(buffer.read_at(0, 10).unwrap(), &data[0..10]);
        assert_eq!(buffer.read_at(5, 10).unwrap(), &data[5..15]);
        // 15 bytes in 3-byte pieces.
        assert_eq!(buffer.reads(), 5);
        assert!(buffer.read_at(15, 10).unwrap_err().is_insufficient_data());
    }
    // The failed request drains the last 5 bytes, then sees end-of-stream once.
    assert_eq!(source.reads, 8);
}

#[test]
fn test_timeout_surfaces_as_source_timeout() {
    let data = jpeg_with_app0();
    let mut source = TimeoutAfter { data: &data[..20] };
    let err = detect(&mut source).unwrap_err();
    assert_eq!(err.image_type(), ImageType::Jpeg);
    assert!(err.is_timeout());
}
