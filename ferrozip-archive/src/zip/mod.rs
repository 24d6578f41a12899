//! ZIP archive model and codec.
//!
//! The in-memory model is a pair of persistent value types: [`Archive`], an
//! ordered collection of [`Member`]s keyed by unique path, and [`Member`],
//! an immutable file or directory entry built through [`MemberBuilder`].
//! Mutating operations (`add`, `remove`) return a new `Archive` value
//! rather than touching the original, so archive values never share
//! mutable state.
//!
//! The codec maps that model onto the ZIP binary layout: one local file
//! header plus payload per member, a central directory mirroring every
//! member, and a trailing end-of-central-directory record. Supported
//! compression methods are `Stored` and `Deflate`; encrypted members, ZIP64
//! extensions, and other methods are rejected as unsupported.

pub mod dostime;
pub mod extra;
pub mod header;

pub use dostime::DosDateTime;
pub use extra::{EXTRA_ID_UNICODE_PATH, EXTRA_ID_UNIX_TIMESTAMP, ExtraField, KnownExtraField};

use ferrozip_core::CompressionLevel;
use ferrozip_core::checksum::Crc32;
use ferrozip_core::error::{FerrozipError, Result};
use ferrozip_deflate::{deflate, inflate};
use header::{
    CentralDirRecord, DOS_ATTR_DIRECTORY, DataDescriptor, EndOfCentralDir, LocalFileHeader,
    ZIP64_MARKER_16, ZIP64_MARKER_32,
};
use std::io::{Cursor, Seek, SeekFrom};
use std::time::SystemTime;

/// Default Unix mode for file members.
const DEFAULT_FILE_MODE: u32 = 0o644;

/// Default Unix mode for directory members.
const DEFAULT_DIR_MODE: u32 = 0o755;

/// "Version made by": Unix host, spec 3.0.
const VERSION_MADE_BY_UNIX: u16 = 0x031E;

/// Compression method of a file member.
///
/// The valid set is closed: anything else in a stream fails decode with an
/// unsupported-feature error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CompressionMethod {
    /// No compression.
    #[default]
    Stored,
    /// DEFLATE compression.
    Deflate,
}

impl CompressionMethod {
    /// Parse a ZIP method id.
    pub fn from_u16(value: u16) -> Result<Self> {
        match value {
            0 => Ok(Self::Stored),
            8 => Ok(Self::Deflate),
            other => Err(FerrozipError::unsupported(format!(
                "compression method {}",
                other
            ))),
        }
    }

    /// ZIP method id.
    pub fn to_u16(self) -> u16 {
        match self {
            Self::Stored => 0,
            Self::Deflate => 8,
        }
    }
}

/// Payload of a file member.
///
/// Invariant: `compressed` decodes under `method` to exactly
/// `uncompressed_size` bytes whose CRC-32 is `crc32`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileData {
    /// How `compressed` is encoded.
    pub method: CompressionMethod,
    /// CRC-32 of the uncompressed content.
    pub crc32: u32,
    /// Uncompressed size in bytes.
    pub uncompressed_size: u32,
    /// Compressed payload bytes.
    pub compressed: Vec<u8>,
}

impl FileData {
    /// Compressed size in bytes.
    pub fn compressed_size(&self) -> u32 {
        self.compressed.len() as u32
    }
}

/// What a member is: a file with payload, or a bare directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MemberKind {
    /// Regular file.
    File(FileData),
    /// Directory (no payload).
    Directory,
}

/// A single archive member. Immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct Member {
    path: String,
    kind: MemberKind,
    mode: u32,
    mtime: SystemTime,
    extra_fields: Vec<ExtraField>,
}

impl Member {
    /// The member path (directories carry a trailing `/`).
    pub fn path(&self) -> &str {
        &self.path
    }

    /// The member kind.
    pub fn kind(&self) -> &MemberKind {
        &self.kind
    }

    /// Whether this member is a file.
    pub fn is_file(&self) -> bool {
        matches!(self.kind, MemberKind::File(_))
    }

    /// Whether this member is a directory.
    pub fn is_dir(&self) -> bool {
        matches!(self.kind, MemberKind::Directory)
    }

    /// Unix permission bits.
    pub fn mode(&self) -> u32 {
        self.mode
    }

    /// Modification time (2-second granularity after a round trip).
    pub fn mtime(&self) -> SystemTime {
        self.mtime
    }

    /// Extra fields in order.
    pub fn extra_fields(&self) -> &[ExtraField] {
        &self.extra_fields
    }

    /// File payload, if this member is a file.
    pub fn file_data(&self) -> Option<&FileData> {
        match &self.kind {
            MemberKind::File(data) => Some(data),
            MemberKind::Directory => None,
        }
    }

    /// Decompress and verify the member content.
    ///
    /// Directories yield an empty buffer. For files the payload is decoded
    /// per its method and checked against the recorded size and CRC-32.
    pub fn content(&self) -> Result<Vec<u8>> {
        let data = match &self.kind {
            MemberKind::Directory => return Ok(Vec::new()),
            MemberKind::File(data) => data,
        };

        let content = match data.method {
            CompressionMethod::Stored => data.compressed.clone(),
            CompressionMethod::Deflate => inflate(&data.compressed)?,
        };

        if content.len() != data.uncompressed_size as usize {
            return Err(FerrozipError::invalid_header(format!(
                "member {:?} decoded to {} bytes, expected {}",
                self.path,
                content.len(),
                data.uncompressed_size
            )));
        }

        let crc = Crc32::checksum(&content);
        if crc != data.crc32 {
            return Err(FerrozipError::checksum_mismatch(data.crc32, crc));
        }

        Ok(content)
    }
}

/// Validated constructor for [`Member`].
///
/// ```
/// use ferrozip_archive::zip::MemberBuilder;
/// use ferrozip_core::CompressionLevel;
///
/// let member = MemberBuilder::file("docs/readme.md", b"# hi")
///     .level(CompressionLevel::BEST)
///     .mode(0o600)
///     .build()
///     .unwrap();
/// assert!(member.is_file());
/// ```
#[derive(Debug)]
pub struct MemberBuilder {
    path: String,
    content: Option<Vec<u8>>,
    level: CompressionLevel,
    force_stored: bool,
    mode: Option<u32>,
    mtime: SystemTime,
    extra_fields: Vec<ExtraField>,
}

impl MemberBuilder {
    /// Start building a file member from its uncompressed content.
    pub fn file(path: impl Into<String>, content: &[u8]) -> Self {
        Self {
            path: path.into(),
            content: Some(content.to_vec()),
            level: CompressionLevel::DEFAULT,
            force_stored: false,
            mode: None,
            mtime: SystemTime::now(),
            extra_fields: Vec::new(),
        }
    }

    /// Start building a directory member.
    pub fn directory(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: None,
            level: CompressionLevel::DEFAULT,
            force_stored: false,
            mode: None,
            mtime: SystemTime::now(),
            extra_fields: Vec::new(),
        }
    }

    /// Set the deflate compression level.
    pub fn level(mut self, level: CompressionLevel) -> Self {
        self.level = level;
        self
    }

    /// Store the content without compression.
    pub fn stored(mut self) -> Self {
        self.force_stored = true;
        self
    }

    /// Set the Unix permission bits.
    pub fn mode(mut self, mode: u32) -> Self {
        self.mode = Some(mode);
        self
    }

    /// Set the modification time (defaults to now).
    pub fn mtime(mut self, mtime: SystemTime) -> Self {
        self.mtime = mtime;
        self
    }

    /// Append an extra field.
    pub fn extra_field(mut self, field: ExtraField) -> Self {
        self.extra_fields.push(field);
        self
    }

    /// Validate and build the member, compressing file content.
    pub fn build(self) -> Result<Member> {
        validate_path(&self.path)?;

        match self.content {
            None => {
                let path = if self.path.ends_with('/') {
                    self.path
                } else {
                    format!("{}/", self.path)
                };
                Ok(Member {
                    path,
                    kind: MemberKind::Directory,
                    mode: self.mode.unwrap_or(DEFAULT_DIR_MODE),
                    mtime: self.mtime,
                    extra_fields: self.extra_fields,
                })
            }
            Some(content) => {
                if self.path.ends_with('/') {
                    return Err(FerrozipError::invalid_input(format!(
                        "file path {:?} must not end with '/'",
                        self.path
                    )));
                }
                if content.len() > u32::MAX as usize {
                    return Err(FerrozipError::unsupported(
                        "member larger than 4 GiB (ZIP64)",
                    ));
                }

                let crc32 = Crc32::checksum(&content);
                let uncompressed_size = content.len() as u32;

                // Deflate unless stored was requested, falling back to
                // stored whenever deflate does not shrink the content.
                let (method, compressed) = if self.force_stored || self.level.level() == 0 {
                    (CompressionMethod::Stored, content)
                } else {
                    let deflated = deflate(&content, self.level.level())?;
                    if deflated.len() < content.len() {
                        (CompressionMethod::Deflate, deflated)
                    } else {
                        (CompressionMethod::Stored, content)
                    }
                };

                Ok(Member {
                    path: self.path,
                    kind: MemberKind::File(FileData {
                        method,
                        crc32,
                        uncompressed_size,
                        compressed,
                    }),
                    mode: self.mode.unwrap_or(DEFAULT_FILE_MODE),
                    mtime: self.mtime,
                    extra_fields: self.extra_fields,
                })
            }
        }
    }
}

/// Reject empty, absolute, traversing, or NUL-carrying member paths.
fn validate_path(path: &str) -> Result<()> {
    if path.is_empty() || path == "/" {
        return Err(FerrozipError::invalid_input("empty member path"));
    }
    if path.starts_with('/') {
        return Err(FerrozipError::invalid_input(format!(
            "absolute member path {:?}",
            path
        )));
    }
    if path.contains('\0') {
        return Err(FerrozipError::invalid_input(format!(
            "member path {:?} contains a NUL byte",
            path
        )));
    }
    for component in path.split('/') {
        if component == ".." {
            return Err(FerrozipError::invalid_input(format!(
                "member path {:?} traverses upward",
                path
            )));
        }
    }
    Ok(())
}

/// An ordered, immutable collection of members keyed by unique path.
///
/// `add` and `remove` return new `Archive` values; iteration and
/// serialization follow insertion order.
#[derive(Debug, Clone, Default)]
pub struct Archive {
    members: Vec<Member>,
}

impl Archive {
    /// Create an empty archive.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return a new archive with `member` added.
    ///
    /// A member whose path is already present replaces the existing one in
    /// place (last write wins, original insertion slot kept).
    #[must_use]
    pub fn add(&self, member: Member) -> Archive {
        let mut members = self.members.clone();
        push_member(&mut members, member);
        Archive { members }
    }

    /// Return a new archive without the member at `path`. Removing an
    /// absent path yields an unchanged copy.
    #[must_use]
    pub fn remove(&self, path: &str) -> Archive {
        let members = self
            .members
            .iter()
            .filter(|m| m.path != path)
            .cloned()
            .collect();
        Archive { members }
    }

    /// Look up a member by path.
    pub fn find(&self, path: &str) -> Option<&Member> {
        self.members.iter().find(|m| m.path == path)
    }

    /// Number of members.
    pub fn member_count(&self) -> usize {
        self.members.len()
    }

    /// Members in insertion order.
    pub fn members(&self) -> impl Iterator<Item = &Member> {
        self.members.iter()
    }

    /// Serialize the archive into ZIP bytes.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        if self.members.len() > ZIP64_MARKER_16 as usize {
            return Err(FerrozipError::unsupported(
                "more than 65535 members (ZIP64)",
            ));
        }

        let mut out = Vec::new();
        let mut central = Vec::with_capacity(self.members.len());

        for member in &self.members {
            if member.path.len() > u16::MAX as usize {
                return Err(FerrozipError::invalid_input(
                    "member path longer than 65535 bytes",
                ));
            }

            let offset = out.len();
            if offset as u64 >= ZIP64_MARKER_32 as u64 {
                return Err(FerrozipError::unsupported(
                    "archive larger than 4 GiB (ZIP64)",
                ));
            }

            let extra = ExtraField::serialize_all(&member.extra_fields)?;
            let dos_time = DosDateTime::from_system_time(member.mtime);

            let (method, crc32, compressed_size, uncompressed_size, payload) = match &member.kind {
                MemberKind::Directory => (0u16, 0u32, 0u32, 0u32, &[][..]),
                MemberKind::File(data) => (
                    data.method.to_u16(),
                    data.crc32,
                    data.compressed_size(),
                    data.uncompressed_size,
                    &data.compressed[..],
                ),
            };

            let version_needed = if method == 8 { 20 } else { 10 };

            let local = LocalFileHeader {
                version_needed,
                flags: 0,
                method,
                dos_time,
                crc32,
                compressed_size,
                uncompressed_size,
                path: member.path.clone(),
                extra: extra.clone(),
            };
            local.write(&mut out)?;
            out.extend_from_slice(payload);

            // High 16 bits: Unix mode with file-type bits; low byte: DOS
            // directory attribute for directory members.
            let unix_mode = if member.is_dir() {
                0o040000 | (member.mode & 0o7777)
            } else {
                0o100000 | (member.mode & 0o7777)
            };
            let external_attr =
                (unix_mode << 16) | if member.is_dir() { DOS_ATTR_DIRECTORY } else { 0 };

            central.push(CentralDirRecord {
                version_made_by: VERSION_MADE_BY_UNIX,
                version_needed,
                flags: 0,
                method,
                dos_time,
                crc32,
                compressed_size,
                uncompressed_size,
                disk_start: 0,
                internal_attr: 0,
                external_attr,
                local_header_offset: offset as u32,
                path: member.path.clone(),
                extra,
                comment: String::new(),
            });
        }

        let cd_offset = out.len();
        for record in &central {
            record.write(&mut out)?;
        }
        let cd_size = out.len() - cd_offset;

        if cd_offset as u64 >= ZIP64_MARKER_32 as u64 {
            return Err(FerrozipError::unsupported(
                "archive larger than 4 GiB (ZIP64)",
            ));
        }

        let eocd = EndOfCentralDir {
            total_entries: self.members.len() as u16,
            cd_size: cd_size as u32,
            cd_offset: cd_offset as u32,
            comment: Vec::new(),
        };
        eocd.write(&mut out)?;

        Ok(out)
    }

    /// Parse ZIP bytes into an archive.
    ///
    /// The end-of-central-directory record is located by scanning backward
    /// (tolerating a trailing comment), the central directory is walked in
    /// order, and each member's local header is validated at its recorded
    /// offset. When a member's "data descriptor" flag is set, the central
    /// directory sizes locate the payload and the trailing descriptor's
    /// fields are used.
    pub fn from_bytes(data: &[u8]) -> Result<Archive> {
        let (eocd, _) = EndOfCentralDir::find(data)?;

        if eocd.total_entries == ZIP64_MARKER_16
            || eocd.cd_size == ZIP64_MARKER_32
            || eocd.cd_offset == ZIP64_MARKER_32
        {
            return Err(FerrozipError::unsupported("ZIP64 archive"));
        }

        let mut cursor = Cursor::new(data);
        cursor.seek(SeekFrom::Start(eocd.cd_offset as u64))?;

        let mut members: Vec<Member> = Vec::with_capacity(eocd.total_entries as usize);

        for _ in 0..eocd.total_entries {
            let record = CentralDirRecord::read(&mut cursor)?;
            let member = Self::read_member(data, &record)?;
            push_member(&mut members, member);
        }

        Ok(Archive { members })
    }

    /// Materialize one member from its central directory record.
    fn read_member(data: &[u8], record: &CentralDirRecord) -> Result<Member> {
        if record.compressed_size == ZIP64_MARKER_32
            || record.uncompressed_size == ZIP64_MARKER_32
            || record.local_header_offset == ZIP64_MARKER_32
        {
            return Err(FerrozipError::unsupported("ZIP64 member"));
        }

        let header_offset = record.local_header_offset as usize;
        if header_offset >= data.len() {
            return Err(FerrozipError::invalid_header(format!(
                "local header offset {} beyond archive end",
                header_offset
            )));
        }

        let mut local_cursor = Cursor::new(&data[header_offset..]);
        let local = LocalFileHeader::read(&mut local_cursor)?;
        let payload_start = header_offset + local.written_len();

        // With flag bit 3 the local header's size/CRC fields are zero; the
        // central directory locates the payload and the trailing
        // descriptor is authoritative.
        let (crc32, compressed_size, uncompressed_size) = if local.has_data_descriptor() {
            let payload_end = payload_start
                .checked_add(record.compressed_size as usize)
                .filter(|&end| end <= data.len())
                .ok_or_else(|| {
                    FerrozipError::unexpected_eof(record.compressed_size as usize)
                })?;
            let descriptor = DataDescriptor::read(&mut Cursor::new(&data[payload_end..]))?;
            if descriptor.compressed_size != record.compressed_size {
                return Err(FerrozipError::invalid_header(
                    "data descriptor disagrees with central directory",
                ));
            }
            (
                descriptor.crc32,
                descriptor.compressed_size,
                descriptor.uncompressed_size,
            )
        } else {
            (
                local.crc32,
                local.compressed_size,
                local.uncompressed_size,
            )
        };

        let payload_end = payload_start
            .checked_add(compressed_size as usize)
            .filter(|&end| end <= data.len())
            .ok_or_else(|| FerrozipError::unexpected_eof(compressed_size as usize))?;
        let payload = &data[payload_start..payload_end];

        let is_dir = record.path.ends_with('/')
            || record.external_attr & DOS_ATTR_DIRECTORY != 0;

        let kind = if is_dir {
            MemberKind::Directory
        } else {
            MemberKind::File(FileData {
                method: CompressionMethod::from_u16(record.method)?,
                crc32,
                uncompressed_size,
                compressed: payload.to_vec(),
            })
        };

        let mode = {
            let unix_mode = record.external_attr >> 16;
            if unix_mode != 0 {
                unix_mode & 0o7777
            } else if is_dir {
                DEFAULT_DIR_MODE
            } else {
                DEFAULT_FILE_MODE
            }
        };

        Ok(Member {
            path: record.path.clone(),
            kind,
            mode,
            mtime: record.dos_time.to_system_time(),
            extra_fields: ExtraField::parse_all(&record.extra)?,
        })
    }
}

/// Insert preserving path uniqueness: an existing path is replaced in its
/// original slot, otherwise the member is appended.
fn push_member(members: &mut Vec<Member>, member: Member) {
    match members.iter().position(|m| m.path == member.path) {
        Some(pos) => members[pos] = member,
        None => members.push(member),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, UNIX_EPOCH};

    fn file(path: &str, content: &[u8]) -> Member {
        MemberBuilder::file(path, content).build().unwrap()
    }

    #[test]
    fn test_builder_file() {
        let member = MemberBuilder::file("a.txt", b"hello hello hello hello")
            .mode(0o600)
            .build()
            .unwrap();

        assert!(member.is_file());
        assert_eq!(member.path(), "a.txt");
        assert_eq!(member.mode(), 0o600);
        assert_eq!(member.content().unwrap(), b"hello hello hello hello");
    }

    #[test]
    fn test_builder_directory_normalizes_path() {
        let member = MemberBuilder::directory("docs").build().unwrap();
        assert!(member.is_dir());
        assert_eq!(member.path(), "docs/");
        assert!(member.content().unwrap().is_empty());
    }

    #[test]
    fn test_builder_stored() {
        let member = MemberBuilder::file("a.bin", b"AAAAAAAAAAAAAAAAAAAAAAAA")
            .stored()
            .build()
            .unwrap();
        let data = member.file_data().unwrap();
        assert_eq!(data.method, CompressionMethod::Stored);
        assert_eq!(data.compressed, b"AAAAAAAAAAAAAAAAAAAAAAAA");
    }

    #[test]
    fn test_builder_incompressible_falls_back_to_stored() {
        // Too short for deflate to win
        let member = file("x", b"q");
        assert_eq!(
            member.file_data().unwrap().method,
            CompressionMethod::Stored
        );
    }

    #[test]
    fn test_builder_rejects_bad_paths() {
        assert!(MemberBuilder::file("", b"x").build().is_err());
        assert!(MemberBuilder::file("/etc/passwd", b"x").build().is_err());
        assert!(MemberBuilder::file("../up", b"x").build().is_err());
        assert!(MemberBuilder::file("a/../../b", b"x").build().is_err());
        assert!(MemberBuilder::file("nul\0byte", b"x").build().is_err());
        assert!(MemberBuilder::file("trailing/", b"x").build().is_err());
    }

    #[test]
    fn test_archive_add_is_persistent() {
        let a0 = Archive::new();
        let a1 = a0.add(file("a.txt", b"one"));

        assert_eq!(a0.member_count(), 0);
        assert_eq!(a1.member_count(), 1);
    }

    #[test]
    fn test_archive_duplicate_path_last_wins() {
        let archive = Archive::new()
            .add(file("a.txt", b"first"))
            .add(file("b.txt", b"other"))
            .add(file("a.txt", b"second"));

        assert_eq!(archive.member_count(), 2);
        let member = archive.find("a.txt").unwrap();
        assert_eq!(member.content().unwrap(), b"second");

        // Replacement keeps the original insertion slot
        let paths: Vec<&str> = archive.members().map(|m| m.path()).collect();
        assert_eq!(paths, vec!["a.txt", "b.txt"]);
    }

    #[test]
    fn test_archive_remove() {
        let archive = Archive::new()
            .add(file("a.txt", b"one"))
            .add(file("b.txt", b"two"));

        let smaller = archive.remove("a.txt");
        assert_eq!(smaller.member_count(), 1);
        assert!(smaller.find("a.txt").is_none());
        assert_eq!(archive.member_count(), 2); // Original untouched

        let unchanged = archive.remove("missing");
        assert_eq!(unchanged.member_count(), 2);
    }

    #[test]
    fn test_roundtrip_single_file() {
        let archive = Archive::new().add(file("hello.txt", b"Hello, World!"));

        let bytes = archive.to_bytes().unwrap();
        let decoded = Archive::from_bytes(&bytes).unwrap();

        assert_eq!(decoded.member_count(), 1);
        let member = decoded.find("hello.txt").unwrap();
        assert_eq!(member.content().unwrap(), b"Hello, World!");
    }

    #[test]
    fn test_roundtrip_preserves_order_and_metadata() {
        let mtime = UNIX_EPOCH + Duration::from_secs(1_700_000_000);
        let archive = Archive::new()
            .add(MemberBuilder::directory("src").mode(0o700).build().unwrap())
            .add(
                MemberBuilder::file("src/main.rs", b"fn main() {}\n".repeat(40).as_slice())
                    .mode(0o640)
                    .mtime(mtime)
                    .build()
                    .unwrap(),
            )
            .add(file("README.md", b"# readme"));

        let bytes = archive.to_bytes().unwrap();
        let decoded = Archive::from_bytes(&bytes).unwrap();

        let paths: Vec<&str> = decoded.members().map(|m| m.path()).collect();
        assert_eq!(paths, vec!["src/", "src/main.rs", "README.md"]);

        let dir = decoded.find("src/").unwrap();
        assert!(dir.is_dir());
        assert_eq!(dir.mode(), 0o700);

        let main = decoded.find("src/main.rs").unwrap();
        assert_eq!(main.mode(), 0o640);
        assert_eq!(main.mtime(), mtime); // Even seconds survive exactly
        assert_eq!(main.content().unwrap(), b"fn main() {}\n".repeat(40));
    }

    #[test]
    fn test_roundtrip_extra_fields() {
        let member = MemberBuilder::file("data.bin", b"payload payload payload")
            .extra_field(ExtraField::unix_timestamp(1_650_000_000))
            .extra_field(ExtraField::new(0xC0DE, vec![0xDE, 0xAD]))
            .build()
            .unwrap();
        let archive = Archive::new().add(member);

        let decoded = Archive::from_bytes(&archive.to_bytes().unwrap()).unwrap();
        let fields = decoded.find("data.bin").unwrap().extra_fields();

        assert_eq!(fields.len(), 2);
        assert_eq!(
            fields[0].interpret(),
            Some(KnownExtraField::UnixTimestamp {
                flags: 0x01,
                mtime: Some(1_650_000_000)
            })
        );
        // Unknown id preserved byte-for-byte
        assert_eq!(fields[1], ExtraField::new(0xC0DE, vec![0xDE, 0xAD]));
    }

    #[test]
    fn test_corrupt_member_crc_detected() {
        let archive = Archive::new().add(
            MemberBuilder::file("a.bin", b"0123456789")
                .stored()
                .build()
                .unwrap(),
        );
        let mut bytes = archive.to_bytes().unwrap();

        // Stored payload sits right after the 30-byte header + 5-byte path
        bytes[35] ^= 0xFF;

        let decoded = Archive::from_bytes(&bytes).unwrap();
        assert!(matches!(
            decoded.find("a.bin").unwrap().content(),
            Err(FerrozipError::ChecksumMismatch { .. })
        ));
    }

    #[test]
    fn test_from_bytes_rejects_garbage() {
        assert!(Archive::from_bytes(b"not a zip at all").is_err());
        assert!(Archive::from_bytes(&[]).is_err());
    }

    #[test]
    fn test_empty_archive_roundtrip() {
        let bytes = Archive::new().to_bytes().unwrap();
        let decoded = Archive::from_bytes(&bytes).unwrap();
        assert_eq!(decoded.member_count(), 0);
    }
}
