//! Entry ordering

use std::cmp::Ordering;

use crate::vault::Entry;

use super::config::SortBy;

/// Order two entries. Folders always precede files.
///
/// Files compare by timestamp under the timestamp keys and by name under the
/// name keys, never both: entries with equal timestamps keep their relative
/// order. `NameAsc` sorts Z to A.
pub fn compare(a: &Entry, b: &Entry, sort_by: SortBy) -> Ordering {
    match (a, b) {
        (Entry::Folder(_), Entry::File(_)) => Ordering::Less,
        (Entry::File(_), Entry::Folder(_)) => Ordering::Greater,
        (Entry::Folder(a), Entry::Folder(b)) => compare_names(&a.name, &b.name, sort_by),
        (Entry::File(a), Entry::File(b)) => {
            let by_time = match sort_by {
                SortBy::Created => b.created.cmp(&a.created),
                SortBy::CreatedAsc => a.created.cmp(&b.created),
                SortBy::Modified => b.modified.cmp(&a.modified),
                SortBy::ModifiedAsc => a.modified.cmp(&b.modified),
                SortBy::Name | SortBy::NameAsc => Ordering::Equal,
            };
            by_time.then_with(|| compare_names(&a.name, &b.name, sort_by))
        }
    }
}

fn compare_names(a: &str, b: &str, sort_by: SortBy) -> Ordering {
    match sort_by {
        SortBy::Name => a.cmp(b),
        SortBy::NameAsc => b.cmp(a),
        _ => Ordering::Equal,
    }
}

/// Stable in-place sort.
pub fn sort_entries(entries: &mut [&Entry], sort_by: SortBy) {
    entries.sort_by(|a, b| compare(a, b, sort_by));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::VaultBuilder;
    use crate::vault::{FileStore, Vault};

    fn names(entries: &[&Entry]) -> Vec<String> {
        entries.iter().map(|e| e.name().to_string()).collect()
    }

    fn sorted(vault: &Vault, sort_by: SortBy) -> Vec<String> {
        let mut entries = vault.children(vault.root());
        sort_entries(&mut entries, sort_by);
        names(&entries)
    }

    fn sample() -> Vault {
        // (path, created, modified)
        VaultBuilder::new()
            .file("b.md", "", 30, 10)
            .file("a.md", "", 10, 30)
            .folder("zeta")
            .file("c.md", "", 20, 20)
            .folder("alpha")
            .build()
    }

    #[test]
    fn test_name_sorts_a_to_z_with_folders_first() {
        assert_eq!(
            sorted(&sample(), SortBy::Name),
            vec!["alpha", "zeta", "a.md", "b.md", "c.md"]
        );
    }

    #[test]
    fn test_name_asc_sorts_z_to_a() {
        assert_eq!(
            sorted(&sample(), SortBy::NameAsc),
            vec!["zeta", "alpha", "c.md", "b.md", "a.md"]
        );
    }

    #[test]
    fn test_created_newest_first() {
        assert_eq!(
            sorted(&sample(), SortBy::Created),
            vec!["zeta", "alpha", "b.md", "c.md", "a.md"]
        );
        assert_eq!(
            sorted(&sample(), SortBy::CreatedAsc),
            vec!["zeta", "alpha", "a.md", "c.md", "b.md"]
        );
    }

    #[test]
    fn test_modified_orders() {
        assert_eq!(
            sorted(&sample(), SortBy::Modified),
            vec!["zeta", "alpha", "a.md", "c.md", "b.md"]
        );
        assert_eq!(
            sorted(&sample(), SortBy::ModifiedAsc),
            vec!["zeta", "alpha", "b.md", "c.md", "a.md"]
        );
    }

    #[test]
    fn test_timestamp_ties_keep_insertion_order() {
        let vault = VaultBuilder::new()
            .file("z.md", "", 5, 5)
            .file("m.md", "", 5, 5)
            .file("a.md", "", 5, 5)
            .build();
        assert_eq!(sorted(&vault, SortBy::Created), vec!["z.md", "m.md", "a.md"]);
    }

    #[test]
    fn test_folders_precede_files_under_every_key() {
        let vault = sample();
        for key in [
            SortBy::Name,
            SortBy::NameAsc,
            SortBy::Created,
            SortBy::CreatedAsc,
            SortBy::Modified,
            SortBy::ModifiedAsc,
        ] {
            let mut entries = vault.children(vault.root());
            sort_entries(&mut entries, key);
            let first_file = entries.iter().position(|e| !e.is_folder()).unwrap();
            assert!(
                entries[first_file..].iter().all(|e| !e.is_folder()),
                "folder after file under {:?}",
                key
            );
        }
    }
}
