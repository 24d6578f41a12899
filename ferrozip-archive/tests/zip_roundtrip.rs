//! End-to-end ZIP archive tests against the public API.

use ferrozip_archive::zip::header::{
    CentralDirRecord, DATA_DESCRIPTOR_SIG, EndOfCentralDir, FLAG_DATA_DESCRIPTOR, LocalFileHeader,
};
use ferrozip_archive::zip::{Archive, DosDateTime, MemberBuilder};
use ferrozip_core::CompressionLevel;
use ferrozip_core::checksum::Crc32;
use std::time::{Duration, UNIX_EPOCH};

#[test]
fn test_multifile_roundtrip() {
    let data1 = "Test data file 1. ".repeat(100);
    let data2 = "File 2 with different content. ".repeat(100);
    let data3 = "Third file data here. ".repeat(100);

    let archive = Archive::new()
        .add(
            MemberBuilder::file("file1.txt", data1.as_bytes())
                .build()
                .unwrap(),
        )
        .add(
            MemberBuilder::file("file2.txt", data2.as_bytes())
                .build()
                .unwrap(),
        )
        .add(
            MemberBuilder::file("file3.txt", data3.as_bytes())
                .build()
                .unwrap(),
        );

    let bytes = archive.to_bytes().unwrap();
    let decoded = Archive::from_bytes(&bytes).unwrap();

    assert_eq!(decoded.member_count(), 3);
    assert_eq!(
        decoded.find("file1.txt").unwrap().content().unwrap(),
        data1.as_bytes()
    );
    assert_eq!(
        decoded.find("file2.txt").unwrap().content().unwrap(),
        data2.as_bytes()
    );
    assert_eq!(
        decoded.find("file3.txt").unwrap().content().unwrap(),
        data3.as_bytes()
    );
}

#[test]
fn test_roundtrip_all_levels() {
    let data = "compressible text, repeated a few times. ".repeat(50);

    for level in [0u8, 1, 6, 9] {
        let archive = Archive::new().add(
            MemberBuilder::file("data.txt", data.as_bytes())
                .level(CompressionLevel::new(level))
                .build()
                .unwrap(),
        );

        let decoded = Archive::from_bytes(&archive.to_bytes().unwrap()).unwrap();
        assert_eq!(
            decoded.find("data.txt").unwrap().content().unwrap(),
            data.as_bytes(),
            "level {} roundtrip failed",
            level
        );
    }
}

#[test]
fn test_roundtrip_mixed_kinds_and_times() {
    // Odd second: decoded mtime must equal the 2-second truncation
    let mtime = UNIX_EPOCH + Duration::from_secs(1_699_999_999);
    let truncated = UNIX_EPOCH + Duration::from_secs(1_699_999_998);

    let archive = Archive::new()
        .add(MemberBuilder::directory("assets").build().unwrap())
        .add(
            MemberBuilder::file("assets/logo.bin", &[0xA5; 2048])
                .stored()
                .mtime(mtime)
                .mode(0o444)
                .build()
                .unwrap(),
        );

    let decoded = Archive::from_bytes(&archive.to_bytes().unwrap()).unwrap();

    let dir = decoded.find("assets/").unwrap();
    assert!(dir.is_dir());

    let logo = decoded.find("assets/logo.bin").unwrap();
    assert!(logo.is_file());
    assert_eq!(logo.mode(), 0o444);
    assert_eq!(logo.mtime(), truncated);
    assert_eq!(logo.content().unwrap(), vec![0xA5; 2048]);
}

#[test]
fn test_eocd_with_trailing_comment() {
    let archive = Archive::new().add(
        MemberBuilder::file("commented.txt", b"body body body")
            .build()
            .unwrap(),
    );
    let mut bytes = archive.to_bytes().unwrap();

    // An appended trailing comment must not break EOCD discovery
    bytes.extend_from_slice("archived by a chatty tool ".repeat(100).as_bytes());

    let decoded = Archive::from_bytes(&bytes).unwrap();
    assert_eq!(
        decoded.find("commented.txt").unwrap().content().unwrap(),
        b"body body body"
    );
}

#[test]
fn test_eocd_with_max_comment() {
    let archive = Archive::new().add(MemberBuilder::file("x", b"payload").build().unwrap());
    let mut bytes = archive.to_bytes().unwrap();
    bytes.extend_from_slice(&vec![b'.'; 65_535]);

    let decoded = Archive::from_bytes(&bytes).unwrap();
    assert_eq!(decoded.member_count(), 1);
}

#[test]
fn test_data_descriptor_member() {
    // Hand-built archive using flag bit 3: the local header carries zero
    // CRC/sizes and a descriptor trails the payload.
    let content = b"descriptor data descriptor data";
    let crc = Crc32::checksum(content);
    let len = content.len() as u32;

    let mut bytes = Vec::new();

    let local = LocalFileHeader {
        version_needed: 20,
        flags: FLAG_DATA_DESCRIPTOR,
        method: 0,
        dos_time: DosDateTime::default(),
        crc32: 0,
        compressed_size: 0,
        uncompressed_size: 0,
        path: "dd.bin".to_string(),
        extra: Vec::new(),
    };
    local.write(&mut bytes).unwrap();
    bytes.extend_from_slice(content);

    bytes.extend_from_slice(&DATA_DESCRIPTOR_SIG.to_le_bytes());
    bytes.extend_from_slice(&crc.to_le_bytes());
    bytes.extend_from_slice(&len.to_le_bytes());
    bytes.extend_from_slice(&len.to_le_bytes());

    let cd_offset = bytes.len() as u32;
    let record = CentralDirRecord {
        version_made_by: 0x031E,
        version_needed: 20,
        flags: FLAG_DATA_DESCRIPTOR,
        method: 0,
        dos_time: DosDateTime::default(),
        crc32: crc,
        compressed_size: len,
        uncompressed_size: len,
        disk_start: 0,
        internal_attr: 0,
        external_attr: 0,
        local_header_offset: 0,
        path: "dd.bin".to_string(),
        extra: Vec::new(),
        comment: String::new(),
    };
    record.write(&mut bytes).unwrap();
    let cd_size = bytes.len() as u32 - cd_offset;

    EndOfCentralDir {
        total_entries: 1,
        cd_size,
        cd_offset,
        comment: Vec::new(),
    }
    .write(&mut bytes)
    .unwrap();

    let decoded = Archive::from_bytes(&bytes).unwrap();
    let member = decoded.find("dd.bin").unwrap();
    assert_eq!(member.content().unwrap(), content);
}

#[test]
fn test_unknown_extra_fields_survive() {
    use ferrozip_archive::zip::ExtraField;

    let member = MemberBuilder::file("tagged.dat", b"tagged content here")
        .extra_field(ExtraField::new(0xFAB1, vec![1, 2, 3, 4, 5]))
        .extra_field(ExtraField::new(0xFAB2, Vec::new()))
        .build()
        .unwrap();

    let archive = Archive::new().add(member);
    let decoded = Archive::from_bytes(&archive.to_bytes().unwrap()).unwrap();

    let fields = decoded.find("tagged.dat").unwrap().extra_fields();
    assert_eq!(fields.len(), 2);
    assert_eq!(fields[0], ExtraField::new(0xFAB1, vec![1, 2, 3, 4, 5]));
    assert_eq!(fields[1], ExtraField::new(0xFAB2, Vec::new()));
}

#[test]
fn test_double_roundtrip_is_stable() {
    let archive = Archive::new()
        .add(MemberBuilder::directory("d").build().unwrap())
        .add(
            MemberBuilder::file("d/f.txt", "stable stable stable ".repeat(20).as_bytes())
                .build()
                .unwrap(),
        );

    let once = archive.to_bytes().unwrap();
    let twice = Archive::from_bytes(&once).unwrap().to_bytes().unwrap();

    // Times are already DOS-truncated after the first decode, so the
    // second encode is byte-identical.
    assert_eq!(once, twice);
}
