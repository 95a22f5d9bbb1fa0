use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;

use byteorder::{ByteOrder, LittleEndian};
use log::debug;
use zip::ZipArchive;

use super::{is_legacy_field, Archive, FieldArray, LoadError, REQUIRED_FIELDS};

const NPY_MAGIC: &[u8] = b"\x93NUMPY";

impl Archive {
    /// Open an `.npz` archive, naming it after the file stem
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let file = File::open(path)?;
        Self::from_reader(name, BufReader::new(file))
    }

    /// Load an archive from any seekable `.npz` byte source
    pub fn from_reader<R: Read + Seek>(
        name: impl Into<String>,
        reader: R,
    ) -> Result<Self, LoadError> {
        let fields = read_members(reader)?;
        Self::from_fields(name, fields)
    }
}

/// Decode every `.npy` member of an `.npz` container, keyed by field name.
///
/// Members without the `.npy` suffix are ignored, as are auxiliary members
/// whose dtype has no 64-bit widening. A canonical field with such a dtype
/// is an error.
pub fn read_members<R: Read + Seek>(reader: R) -> Result<BTreeMap<String, FieldArray>, LoadError> {
    let mut archive = ZipArchive::new(reader)?;
    let mut fields = BTreeMap::new();

    for index in 0..archive.len() {
        let mut entry = archive.by_index(index)?;
        if entry.is_dir() {
            continue;
        }

        let member = entry.name().to_string();
        let Some(field) = member.strip_suffix(".npy") else {
            debug!("Ignoring non-array member '{}'", member);
            continue;
        };

        // Buffer grows with the decompressed data, not with any declared size
        let mut bytes = Vec::new();
        entry.read_to_end(&mut bytes)?;
        check_header_length(&member, &bytes)?;

        match FieldArray::decode(&bytes) {
            Ok(Some(array)) => {
                debug!(
                    "Decoded member '{}': {}, shape {:?}",
                    member,
                    array.dtype(),
                    array.shape()
                );
                fields.insert(field.to_string(), array);
            }
            Ok(None) if REQUIRED_FIELDS.contains(&field) => {
                return Err(LoadError::UnsupportedDtype(field.to_string()));
            }
            Ok(None) => {
                debug!(
                    "Ignoring {}member '{}' with unsupported dtype",
                    if is_legacy_field(field) { "legacy " } else { "" },
                    member
                );
            }
            Err(source) => return Err(LoadError::MemberError { member, source }),
        }
    }

    Ok(fields)
}

/// Reject a `.npy` preamble whose declared header runs past the member.
/// Anything else malformed is left to the decoder.
fn check_header_length(member: &str, bytes: &[u8]) -> Result<(), LoadError> {
    let Some(rest) = bytes.strip_prefix(NPY_MAGIC) else {
        return Ok(());
    };
    // Version 1.x has a u16 header length, 2.x and 3.x a u32
    let (len_bytes, prefix) = match rest.first() {
        Some(1) => (2, NPY_MAGIC.len() + 4),
        Some(2) | Some(3) => (4, NPY_MAGIC.len() + 6),
        _ => return Ok(()),
    };
    let Some(raw) = rest.get(2..2 + len_bytes) else {
        return Ok(());
    };
    let header_len = if len_bytes == 2 {
        LittleEndian::read_u16(raw) as usize
    } else {
        LittleEndian::read_u32(raw) as usize
    };

    let declared = prefix.saturating_add(header_len);
    if declared > bytes.len() {
        return Err(LoadError::TruncatedHeader {
            member: member.to_string(),
            declared,
            available: bytes.len(),
        });
    }
    Ok(())
}
