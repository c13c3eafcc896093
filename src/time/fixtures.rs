//! Hand-built image bytes for tests

/// TIFF entry types
const TYPE_ASCII: u16 = 2;
const TYPE_SHORT: u16 = 3;
const TYPE_LONG: u16 = 4;

const TAG_ORIENTATION: u16 = 0x0112;
const TAG_EXIF_IFD_POINTER: u16 = 0x8769;
const TAG_DATE_TIME_ORIGINAL: u16 = 0x9003;

fn push_entry(buf: &mut Vec<u8>, tag: u16, typ: u16, count: u32, value: [u8; 4]) {
    buf.extend_from_slice(&tag.to_le_bytes());
    buf.extend_from_slice(&typ.to_le_bytes());
    buf.extend_from_slice(&count.to_le_bytes());
    buf.extend_from_slice(&value);
}

/// Little-endian TIFF block, optionally carrying `DateTimeOriginal`
fn tiff_with_datetime(value: Option<&str>) -> Vec<u8> {
    let mut tiff = Vec::new();
    tiff.extend_from_slice(b"II");
    tiff.extend_from_slice(&42u16.to_le_bytes());
    tiff.extend_from_slice(&8u32.to_le_bytes());

    let Some(value) = value else {
        // IFD0 with a single orientation entry and no Exif IFD
        tiff.extend_from_slice(&1u16.to_le_bytes());
        push_entry(&mut tiff, TAG_ORIENTATION, TYPE_SHORT, 1, [1, 0, 0, 0]);
        tiff.extend_from_slice(&0u32.to_le_bytes());
        return tiff;
    };

    // IFD0 (offset 8, 18 bytes) points at the Exif IFD (offset 26, 18 bytes)
    let exif_ifd_offset: u32 = 8 + 18;
    let data_offset: u32 = exif_ifd_offset + 18;

    tiff.extend_from_slice(&1u16.to_le_bytes());
    push_entry(
        &mut tiff,
        TAG_EXIF_IFD_POINTER,
        TYPE_LONG,
        1,
        exif_ifd_offset.to_le_bytes(),
    );
    tiff.extend_from_slice(&0u32.to_le_bytes());

    let mut ascii = value.as_bytes().to_vec();
    ascii.push(0);
    let count = ascii.len() as u32;

    tiff.extend_from_slice(&1u16.to_le_bytes());
    if ascii.len() <= 4 {
        let mut inline = [0u8; 4];
        inline[..ascii.len()].copy_from_slice(&ascii);
        push_entry(&mut tiff, TAG_DATE_TIME_ORIGINAL, TYPE_ASCII, count, inline);
        tiff.extend_from_slice(&0u32.to_le_bytes());
    } else {
        push_entry(
            &mut tiff,
            TAG_DATE_TIME_ORIGINAL,
            TYPE_ASCII,
            count,
            data_offset.to_le_bytes(),
        );
        tiff.extend_from_slice(&0u32.to_le_bytes());
        tiff.extend_from_slice(&ascii);
    }

    tiff
}

/// Minimal JPEG: SOI, an APP1 Exif segment, EOI
pub(crate) fn jpeg_with_datetime(value: Option<&str>) -> Vec<u8> {
    let tiff = tiff_with_datetime(value);

    let mut jpeg = vec![0xFF, 0xD8, 0xFF, 0xE1];
    let segment_len = (2 + 6 + tiff.len()) as u16;
    jpeg.extend_from_slice(&segment_len.to_be_bytes());
    jpeg.extend_from_slice(b"Exif\0\0");
    jpeg.extend_from_slice(&tiff);
    jpeg.extend_from_slice(&[0xFF, 0xD9]);
    jpeg
}

/// PNG signature followed by IHDR and IEND, no eXIf chunk
pub(crate) fn png_without_exif() -> Vec<u8> {
    let mut png = vec![0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

    let mut ihdr = Vec::new();
    ihdr.extend_from_slice(&1u32.to_be_bytes());
    ihdr.extend_from_slice(&1u32.to_be_bytes());
    ihdr.extend_from_slice(&[8, 2, 0, 0, 0]);
    push_chunk(&mut png, b"IHDR", &ihdr);
    push_chunk(&mut png, b"IEND", &[]);
    png
}

fn push_chunk(buf: &mut Vec<u8>, kind: &[u8; 4], data: &[u8]) {
    buf.extend_from_slice(&(data.len() as u32).to_be_bytes());
    buf.extend_from_slice(kind);
    buf.extend_from_slice(data);
    // CRC is not checked by the readers under test
    buf.extend_from_slice(&0u32.to_be_bytes());
}
