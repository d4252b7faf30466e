//! Mapping between slash-namespaced pack ids and pack file names.

/// Separator used in place of `/` when a pack id becomes a file name.
const FILE_SEPARATOR: &str = "__";

/// Returns the file name a pack is stored under.
///
/// ```
/// assert_eq!(dialect::pack_file_name("vlaams/west-vlaams"), "vlaams__west-vlaams.json");
/// ```
pub fn pack_file_name(id: &str) -> String {
    format!("{}.json", id.replace('/', FILE_SEPARATOR))
}

/// Inverse of [`pack_file_name`]. Returns `None` for names without a `.json` suffix.
pub fn pack_id_from_file_name(file_name: &str) -> Option<String> {
    file_name
        .strip_suffix(".json")
        .map(|stem| stem.replace(FILE_SEPARATOR, "/"))
}
