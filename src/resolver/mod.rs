//! Front-end path resolution module
//!
//! Decides which file should answer a request: a concrete asset under the
//! built-output directory, the same under the source directory when no build
//! exists, or the index document for anything else so client-side routes keep
//! working after a full page load.

use std::path::Path;

/// Where a request resolved to: a base directory (always one of the two
/// configured roots) and a path relative to it (either the sanitized request
/// path or the index document name).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution<'a> {
    pub base_dir: &'a Path,
    pub relative_path: String,
}

/// Resolve a requested path against the front-end roots.
///
/// The built root wins whenever it exists as a directory, even if empty; a
/// directory with zero files still counts as "built". Within the active root,
/// a non-empty path that exists is served as-is and everything else falls back
/// to the index document. A missing asset therefore yields the index rather
/// than a not-found, which is what makes client-side routing work. Only
/// read-only existence checks touch the filesystem; the call never fails.
pub fn resolve<'a>(
    requested_path: &str,
    built_root: &'a Path,
    source_root: &'a Path,
    index_file: &str,
) -> Resolution<'a> {
    let clean = sanitize(requested_path);

    let root = if built_root.is_dir() {
        built_root
    } else {
        source_root
    };

    if !clean.is_empty() && root.join(&clean).exists() {
        return Resolution {
            base_dir: root,
            relative_path: clean,
        };
    }

    Resolution {
        base_dir: root,
        relative_path: index_file.to_string(),
    }
}

/// Reduce a request path to a safe relative path.
///
/// Leading slashes are stripped and `.`/`..` segments are dropped entirely, so
/// the result can never climb out of the root it is joined to. The responder
/// re-checks containment after canonicalization; this keeps the existence
/// check here from being fooled first.
fn sanitize(path: &str) -> String {
    path.split('/')
        .filter(|segment| !segment.is_empty() && *segment != "." && *segment != "..")
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    const INDEX: &str = "index.html";

    /// Front-end layout with both a source tree and a built output tree
    fn frontend_with_build() -> (TempDir, PathBuf, PathBuf) {
        let tmp = TempDir::new().expect("tempdir");
        let source = tmp.path().join("frontend");
        let built = source.join("dist");
        fs::create_dir_all(built.join("assets")).expect("create dirs");
        fs::write(source.join(INDEX), "<html>source</html>").expect("write");
        fs::write(source.join("style.css"), "body{}").expect("write");
        fs::write(built.join(INDEX), "<html>built</html>").expect("write");
        fs::write(built.join("assets/app.js"), "console.log()").expect("write");
        (tmp, source, built)
    }

    /// Front-end layout where no build has been produced
    fn frontend_without_build() -> (TempDir, PathBuf, PathBuf) {
        let tmp = TempDir::new().expect("tempdir");
        let source = tmp.path().join("frontend");
        let built = source.join("dist");
        fs::create_dir_all(&source).expect("create dirs");
        fs::write(source.join(INDEX), "<html>source</html>").expect("write");
        fs::write(source.join("style.css"), "body{}").expect("write");
        (tmp, source, built)
    }

    #[test]
    fn built_asset_is_served_from_built_root() {
        let (_tmp, source, built) = frontend_with_build();
        let res = resolve("assets/app.js", &built, &source, INDEX);
        assert_eq!(res.base_dir, built.as_path());
        assert_eq!(res.relative_path, "assets/app.js");
    }

    #[test]
    fn missing_path_under_built_root_falls_back_to_built_index() {
        let (_tmp, source, built) = frontend_with_build();
        let res = resolve("about", &built, &source, INDEX);
        assert_eq!(res.base_dir, built.as_path());
        assert_eq!(res.relative_path, INDEX);
    }

    #[test]
    fn built_root_never_falls_back_to_source() {
        // style.css exists in source but not in the build output; the SPA
        // fallback must still answer with the built index, not the source file
        let (_tmp, source, built) = frontend_with_build();
        let res = resolve("style.css", &built, &source, INDEX);
        assert_eq!(res.base_dir, built.as_path());
        assert_eq!(res.relative_path, INDEX);
    }

    #[test]
    fn source_asset_is_served_when_no_build_exists() {
        let (_tmp, source, built) = frontend_without_build();
        let res = resolve("style.css", &built, &source, INDEX);
        assert_eq!(res.base_dir, source.as_path());
        assert_eq!(res.relative_path, "style.css");
    }

    #[test]
    fn missing_path_without_build_falls_back_to_source_index() {
        let (_tmp, source, built) = frontend_without_build();
        let res = resolve("unknown", &built, &source, INDEX);
        assert_eq!(res.base_dir, source.as_path());
        assert_eq!(res.relative_path, INDEX);
    }

    #[test]
    fn empty_path_short_circuits_to_index() {
        let (_tmp, source, built) = frontend_with_build();
        let res = resolve("", &built, &source, INDEX);
        assert_eq!(res.base_dir, built.as_path());
        assert_eq!(res.relative_path, INDEX);
    }

    #[test]
    fn empty_built_directory_still_counts_as_built() {
        let (_tmp, source, built) = frontend_without_build();
        fs::create_dir_all(&built).expect("create dirs");
        let res = resolve("style.css", &built, &source, INDEX);
        assert_eq!(res.base_dir, built.as_path());
        assert_eq!(res.relative_path, INDEX);
    }

    #[test]
    fn both_roots_absent_still_resolves_to_source_index() {
        let tmp = TempDir::new().expect("tempdir");
        let source = tmp.path().join("frontend");
        let built = source.join("dist");
        let res = resolve("anything", &built, &source, INDEX);
        assert_eq!(res.base_dir, source.as_path());
        assert_eq!(res.relative_path, INDEX);
    }

    #[test]
    fn traversal_segments_are_dropped_before_existence_checks() {
        let (_tmp, source, built) = frontend_with_build();
        // "../assets/app.js" sanitizes to "assets/app.js", which exists
        let res = resolve("../assets/app.js", &built, &source, INDEX);
        assert_eq!(res.base_dir, built.as_path());
        assert_eq!(res.relative_path, "assets/app.js");

        // A pure traversal path sanitizes to empty and yields the index
        let res = resolve("../../etc/passwd", &built, &source, INDEX);
        assert_eq!(res.base_dir, built.as_path());
        assert_eq!(res.relative_path, INDEX);
    }

    #[test]
    fn resolution_is_idempotent() {
        let (_tmp, source, built) = frontend_with_build();
        let first = resolve("assets/app.js", &built, &source, INDEX);
        let second = resolve("assets/app.js", &built, &source, INDEX);
        assert_eq!(first, second);
    }

    #[test]
    fn sanitize_normalizes_paths() {
        assert_eq!(sanitize("/assets/app.js"), "assets/app.js");
        assert_eq!(sanitize("//a//b/"), "a/b");
        assert_eq!(sanitize("./a/./b"), "a/b");
        assert_eq!(sanitize("a/../b"), "a/b");
        assert_eq!(sanitize("/"), "");
        assert_eq!(sanitize(""), "");
    }
}
