use std::path::Path;

pub fn prettyprint_usize(x: usize) -> String {
    let num = format!("{}", x);
    let mut result = String::new();
    let mut i = num.len();
    for c in num.chars() {
        result.push(c);
        i -= 1;
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
    }
    result
}

/// Splits the file name into the part before any extension and all of the extensions, so
/// "networks/foo.net.xml" becomes ("foo", ".net.xml"). Leading dots belong to the name.
pub fn true_basename<I: AsRef<str>>(path: I) -> (String, String) {
    let name = Path::new(path.as_ref())
        .file_name()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let leading = name.len() - name.trim_start_matches('.').len();
    match name[leading..].find('.') {
        Some(idx) => (
            name[..leading + idx].to_string(),
            name[leading + idx..].to_string(),
        ),
        None => (name, String::new()),
    }
}

/// A path with the given file name, in the same directory as `path`.
pub fn sibling_path<I: AsRef<str>>(path: I, file_name: &str) -> String {
    match Path::new(path.as_ref()).parent() {
        Some(dir) => dir.join(file_name).display().to_string(),
        None => file_name.to_string(),
    }
}

/// Inserts `suffix` between the true basename and the extensions, so ("out/a.net.xml",
/// "_continuous") becomes "out/a_continuous.net.xml".
pub fn insert_suffix<I: AsRef<str>>(path: I, suffix: &str) -> String {
    let (name, ext) = true_basename(path.as_ref());
    sibling_path(path, &format!("{}{}{}", name, suffix, ext))
}

/// The current local time, formatted to be used in file names.
pub fn timestamp() -> String {
    chrono::Local::now().format("%Y-%m-%d-%H-%M-%S").to_string()
}
