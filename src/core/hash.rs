//! Content fingerprints built on FNV-1a.
//!
//! Stability matters more than strength here: revisions key thumbnail
//! caches and listing fingerprints feed change detection, so the same
//! input must hash identically across sessions.

use crate::models::FileSystemItem;

const FNV_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

/// 64-bit FNV-1a over raw bytes.
pub fn fnv1a(bytes: &[u8]) -> u64 {
    let mut hash = FNV_OFFSET;
    for byte in bytes {
        hash ^= u64::from(*byte);
        hash = hash.wrapping_mul(FNV_PRIME);
    }
    hash
}

/// Short pseudo-revision for entries that carry no server-side id.
pub fn path_revision(path: &str) -> String {
    format!("{:08x}", fnv1a(path.as_bytes()) & 0xffff_ffff)
}

/// Order-insensitive fingerprint of a directory listing.
///
/// Two listings fingerprint equal exactly when they contain the same
/// entries with the same kind and size, regardless of sort order.
pub fn listing_fingerprint(items: &[FileSystemItem]) -> String {
    let mut refs: Vec<&FileSystemItem> = items.iter().collect();
    refs.sort_by(|a, b| a.path.cmp(&b.path));

    let mut hash = FNV_OFFSET;
    let mut feed = |bytes: &[u8]| {
        for byte in bytes {
            hash ^= u64::from(*byte);
            hash = hash.wrapping_mul(FNV_PRIME);
        }
    };
    for item in refs {
        feed(item.name.as_bytes());
        feed(&[0]);
        feed(item.path.as_bytes());
        feed(&[0]);
        feed(item.kind.as_str().as_bytes());
        feed(&[0]);
        feed(&item.size.unwrap_or(0).to_le_bytes());
        feed(&[0xff]);
    }
    format!("{hash:016x}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::EntryKind;

    fn item(name: &str, path: &str, kind: EntryKind, size: Option<u64>) -> FileSystemItem {
        FileSystemItem {
            name: name.to_string(),
            path: path.to_string(),
            kind,
            size,
            revision: path_revision(path),
            source_url: String::new(),
            download_url: None,
            is_accessible: true,
            access_error: None,
        }
    }

    #[test]
    fn fnv1a_known_vectors() {
        // Reference values for the 64-bit variant.
        assert_eq!(fnv1a(b""), 0xcbf2_9ce4_8422_2325);
        assert_eq!(fnv1a(b"a"), 0xaf63_dc4c_8601_ec8c);
    }

    #[test]
    fn path_revision_is_stable_and_short() {
        let rev = path_revision("docs/guide.md");
        assert_eq!(rev.len(), 8);
        assert_eq!(rev, path_revision("docs/guide.md"));
        assert_ne!(rev, path_revision("docs/guide2.md"));
    }

    #[test]
    fn fingerprint_ignores_order() {
        let a = item("a.txt", "d/a.txt", EntryKind::File, Some(3));
        let b = item("b.txt", "d/b.txt", EntryKind::File, Some(9));
        let fwd = listing_fingerprint(&[a.clone(), b.clone()]);
        let rev = listing_fingerprint(&[b, a]);
        assert_eq!(fwd, rev);
    }

    #[test]
    fn fingerprint_tracks_content_changes() {
        let base = vec![item("a.txt", "d/a.txt", EntryKind::File, Some(3))];
        let grown = vec![
            item("a.txt", "d/a.txt", EntryKind::File, Some(3)),
            item("b.txt", "d/b.txt", EntryKind::File, Some(1)),
        ];
        let resized = vec![item("a.txt", "d/a.txt", EntryKind::File, Some(4))];
        let retyped = vec![item("a.txt", "d/a.txt", EntryKind::Directory, None)];
        let fp = listing_fingerprint(&base);
        assert_ne!(fp, listing_fingerprint(&grown));
        assert_ne!(fp, listing_fingerprint(&resized));
        assert_ne!(fp, listing_fingerprint(&retyped));
    }
}
