/*
 * Parsing of the packed result buffer produced by the Win32 file dialogs.
 *
 * With OFN_ALLOWMULTISELECT the dialog fills one fixed buffer with
 * `directory NUL name-1 NUL name-2 NUL ... NUL NUL`; when the user picked a
 * single file the buffer degenerates to one full path. Without multi-select
 * the buffer is a single NUL-terminated absolute path. This module turns
 * either shape into an ordered list of full paths, keeping the OS-native
 * selection order. Raw buffer walking stays here; callers only ever see
 * discrete strings.
 *
 * Everything in this module is pure UTF-16 slice handling with no OS calls,
 * so it is exercised on every target.
 */

const PATH_SEPARATOR: u16 = b'\\' as u16;

/*
 * Splits a double-NUL-terminated buffer into its component strings.
 * Scanning stops at the first zero-length string (the second NUL of the
 * final terminator), or at the end of the slice if the terminator is
 * missing.
 */
pub fn split_nul_strings(buffer: &[u16]) -> Vec<Vec<u16>> {
    let mut strings = Vec::new();
    let mut rest = buffer;
    loop {
        let len = rest.iter().position(|&unit| unit == 0).unwrap_or(rest.len());
        if len == 0 {
            break;
        }
        strings.push(rest[..len].to_vec());
        if len >= rest.len() {
            break;
        }
        rest = &rest[len + 1..];
    }
    strings
}

/*
 * Decodes a file-dialog result buffer into full paths, in buffer order.
 *
 * Multi-select: zero strings is a valid empty selection; one string is
 * already a full path; two or more mean the first is the shared directory
 * prefix and each following name is joined onto it. Single-select: the
 * buffer holds at most one path.
 */
pub fn parse_file_dialog_buffer(buffer: &[u16], multi_select: bool) -> Vec<Vec<u16>> {
    if !multi_select {
        let len = buffer.iter().position(|&unit| unit == 0).unwrap_or(buffer.len());
        if len == 0 {
            return Vec::new();
        }
        return vec![buffer[..len].to_vec()];
    }

    let mut strings = split_nul_strings(buffer);
    if strings.len() < 2 {
        return strings;
    }
    let directory = strings.remove(0);
    strings
        .into_iter()
        .map(|name| join_path(&directory, &name))
        .collect()
}

// Joins `name` onto `directory`, inserting a backslash unless the prefix
// already ends with one (it does when the directory is a drive root).
fn join_path(directory: &[u16], name: &[u16]) -> Vec<u16> {
    let mut path = directory.to_vec();
    if path.last() != Some(&PATH_SEPARATOR) {
        path.push(PATH_SEPARATOR);
    }
    path.extend_from_slice(name);
    path
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wide(s: &str) -> Vec<u16> {
        s.encode_utf16().collect()
    }

    fn narrow(units: &[u16]) -> String {
        String::from_utf16(units).expect("test data is valid UTF-16")
    }

    #[test]
    fn split_stops_at_the_double_nul() {
        let buffer = wide("C:\\dir\0a.txt\0b.txt\0\0trailing-garbage");
        let strings = split_nul_strings(&buffer);
        assert_eq!(strings.len(), 3);
        assert_eq!(narrow(&strings[0]), "C:\\dir");
        assert_eq!(narrow(&strings[1]), "a.txt");
        assert_eq!(narrow(&strings[2]), "b.txt");
    }

    #[test]
    fn split_of_empty_buffer_is_empty() {
        assert!(split_nul_strings(&[]).is_empty());
        assert!(split_nul_strings(&[0, 0]).is_empty());
    }

    #[test]
    fn multi_select_joins_names_onto_the_directory_in_buffer_order() {
        let buffer = wide("C:\\dir\0a.txt\0b.txt\0\0");
        let paths = parse_file_dialog_buffer(&buffer, true);
        assert_eq!(paths.len(), 2);
        assert_eq!(narrow(&paths[0]), "C:\\dir\\a.txt");
        assert_eq!(narrow(&paths[1]), "C:\\dir\\b.txt");
    }

    #[test]
    fn multi_select_preserves_native_selection_order() {
        // The dialog reports selection order, not sorted order; the parser
        // must not reorder.
        let buffer = wide("C:\\dir\0z.txt\0a.txt\0\0");
        let paths = parse_file_dialog_buffer(&buffer, true);
        assert_eq!(narrow(&paths[0]), "C:\\dir\\z.txt");
        assert_eq!(narrow(&paths[1]), "C:\\dir\\a.txt");
    }

    #[test]
    fn multi_select_with_one_string_is_already_a_full_path() {
        let buffer = wide("C:\\dir\\only.txt\0\0");
        let paths = parse_file_dialog_buffer(&buffer, true);
        assert_eq!(paths.len(), 1);
        assert_eq!(narrow(&paths[0]), "C:\\dir\\only.txt");
    }

    #[test]
    fn multi_select_with_empty_buffer_is_an_empty_selection() {
        assert!(parse_file_dialog_buffer(&[0, 0], true).is_empty());
    }

    #[test]
    fn drive_root_prefix_does_not_double_the_separator() {
        let buffer = wide("C:\\\0a.txt\0\0");
        let paths = parse_file_dialog_buffer(&buffer, true);
        assert_eq!(narrow(&paths[0]), "C:\\a.txt");
    }

    #[test]
    fn single_select_returns_the_sole_path() {
        let buffer = wide("C:\\single.txt\0");
        let paths = parse_file_dialog_buffer(&buffer, false);
        assert_eq!(paths.len(), 1);
        assert_eq!(narrow(&paths[0]), "C:\\single.txt");
    }

    #[test]
    fn single_select_with_empty_buffer_is_no_selection() {
        assert!(parse_file_dialog_buffer(&[0], false).is_empty());
    }
}
