//! In-memory zip assembly for batch downloads.

use std::io::{Cursor, Write};

use indexmap::IndexMap;
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

/// Write entries into a single in-memory zip archive and return its bytes.
///
/// Entry names are file base names. Same-named files have already collapsed
/// to the last occurrence during `IndexMap` collection, so each name appears
/// once in the archive.
pub fn build_archive(entries: &IndexMap<String, Vec<u8>>) -> zip::result::ZipResult<Vec<u8>> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let options =
        SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);

    for (name, bytes) in entries {
        writer.start_file(name.as_str(), options)?;
        writer.write_all(bytes)?;
    }

    Ok(writer.finish()?.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;

    fn read_back(archive: &[u8]) -> Vec<(String, Vec<u8>)> {
        let mut zip = zip::ZipArchive::new(Cursor::new(archive)).unwrap();
        let mut out = Vec::new();
        for i in 0..zip.len() {
            let mut file = zip.by_index(i).unwrap();
            let mut contents = Vec::new();
            file.read_to_end(&mut contents).unwrap();
            out.push((file.name().to_string(), contents));
        }
        out
    }

    #[test]
    fn archive_round_trips_entries() {
        let mut entries = IndexMap::new();
        entries.insert("a.png".to_string(), b"pixels".to_vec());
        entries.insert("b.mp3".to_string(), b"audio".to_vec());

        let archive = build_archive(&entries).unwrap();
        let files = read_back(&archive);

        assert_eq!(files.len(), 2);
        assert_eq!(files[0], ("a.png".to_string(), b"pixels".to_vec()));
        assert_eq!(files[1], ("b.mp3".to_string(), b"audio".to_vec()));
    }

    #[test]
    fn same_name_collapses_to_last_write() {
        let mut entries = IndexMap::new();
        entries.insert("clip.mp4".to_string(), b"first".to_vec());
        entries.insert("clip.mp4".to_string(), b"second".to_vec());

        let archive = build_archive(&entries).unwrap();
        let files = read_back(&archive);

        assert_eq!(files.len(), 1);
        assert_eq!(files[0].1, b"second".to_vec());
    }

    #[test]
    fn empty_archive_is_still_valid_zip() {
        let archive = build_archive(&IndexMap::new()).unwrap();
        assert!(read_back(&archive).is_empty());
    }
}
