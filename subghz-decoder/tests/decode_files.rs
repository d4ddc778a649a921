// End-to-end decoding of capture files on disk
use std::io::Write;
use subghz_decoder::{
    decode_capture_file, decode_file, render_header, ArrayRenderer, DecoderError, Encoding,
};
use tempfile::NamedTempFile;

fn capture_file(content: &[u8]) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn raw_capture_passes_through() {
    let file = capture_file(
        b"Filetype: Flipper SubGhz RAW File
Version: 1
Frequency: 433920000
Preset: FuriHalSubGhzPresetOok650Async
Protocol: RAW
RAW_Data: 100 -200 300
",
    );

    assert_eq!(decode_file(file.path()).unwrap(), vec![100, -200, 300]);
}

#[test]
fn raw_capture_spanning_lines() {
    let file = capture_file(
        b"Protocol: RAW
RAW_Data: 350 -1050 350
  -350 1050 x7 -350 1050
-350 1050
",
    );

    // The bad token keeps what came before it on that line, then stops for good
    assert_eq!(
        decode_file(file.path()).unwrap(),
        vec![350, -1050, 350, -350, 1050]
    );
}

#[test]
fn raw_capture_drops_non_numeric_header_tokens() {
    let file = capture_file(b"RAW_Data: 10 ten -20 +30\n");
    assert_eq!(decode_file(file.path()).unwrap(), vec![10, -20, 30]);
}

#[test]
fn binraw_capture_is_run_length_decoded() {
    let file = capture_file(
        b"Filetype: Flipper SubGhz Key File
Version: 1
Frequency: 433920000
Preset: FuriHalSubGhzPresetOok650Async
Protocol: BinRAW
Bit: 20
TE: 300
Bit_RAW: 20
Data_RAW: 8E 38
E0 00
",
    );

    let decoded = decode_capture_file(file.path()).unwrap();
    assert_eq!(decoded.encoding, Encoding::BinRaw);
    assert_eq!(decoded.metadata.frequency, Some(433_920_000));
    // 1000 1110 0011 1000 1110 (first 20 bits)
    assert_eq!(
        decoded.timings,
        vec![300, -900, 900, -900, 900, -900, 900, -300]
    );

    let bits: i64 = decoded.timings.iter().map(|t| t.abs() / 300).sum();
    assert_eq!(bits, 20);
}

#[test]
fn binraw_bad_hex_line_is_discarded() {
    let file = capture_file(
        b"Protocol: BinRAW
TE: 100
Data_RAW: F0
0F GG
FF
",
    );

    // "0F GG" is dropped as a whole and ends the section, so "FF" is ignored too
    assert_eq!(decode_file(file.path()).unwrap(), vec![400, -400]);
}

#[test]
fn missing_file_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("off.sub");
    assert!(matches!(decode_file(&path), Err(DecoderError::NotFound(p)) if p == path));
}

#[test]
fn non_utf8_content_is_io_error() {
    let file = capture_file(b"Protocol: RAW\nRAW_Data: 1 \xff\xfe 2\n");
    assert!(matches!(
        decode_file(file.path()),
        Err(DecoderError::IoError(_))
    ));
}

#[test]
fn directory_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    assert!(matches!(
        decode_file(dir.path()),
        Err(DecoderError::IoError(_))
    ));
}

#[test]
fn decoded_files_render_into_header() {
    let off = capture_file(b"Protocol: RAW\nRAW_Data: 1 -2 3\n");
    let on = capture_file(b"Protocol: BinRAW\nTE: 10\nData_RAW: 0F\n");

    let renderer = ArrayRenderer::default();
    let blocks = vec![
        renderer
            .render(&decode_file(off.path()).unwrap(), "signalOff")
            .unwrap(),
        renderer
            .render(&decode_file(on.path()).unwrap(), "signalOn")
            .unwrap(),
    ];
    let header = render_header(&blocks);

    assert!(header.starts_with("// Generated RF signal arrays for ESP32\n"));
    assert!(header.contains("const int16_t signalOff[] = {\n  1, -2, 3\n};\n"));
    assert!(header.contains("const int signalOffLength = 3;\n\nconst int16_t signalOn[]"));
    assert!(header.ends_with("const int signalOnLength = 2;\n"));
}
