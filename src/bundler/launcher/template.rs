//! Launcher script template.

/// Python launcher rendered once per bind run.
///
/// `files` and `data_dir` hold pre-escaped Python string literals. Frozen
/// builds find the files in the extraction directory; a launcher run from
/// source finds them in the staging subdirectory next to it.
/// One-file executables unpack into a directory that disappears when the
/// process exits, so the files are copied somewhere persistent before the
/// default application is asked to open them.
pub const LAUNCHER_TEMPLATE: &str = r#"# Generated by file_binder. Opens every bundled file with its default application.
import os
import shutil
import subprocess
import sys
import tempfile

BUNDLED_FILES = [
{{#each files}}
    {{this}},
{{/each}}
]


def bundle_dir():
    frozen = getattr(sys, "_MEIPASS", None)
    if frozen is not None:
        return frozen
    return os.path.join(os.path.dirname(os.path.abspath(__file__)), {{data_dir}})


def open_with_default(path):
    if sys.platform.startswith("win"):
        os.startfile(path)
    elif sys.platform == "darwin":
        subprocess.Popen(["open", path])
    else:
        subprocess.Popen(["xdg-open", path])


def main():
    source = bundle_dir()
    target = tempfile.mkdtemp(prefix="{{prefix}}")
    for name in BUNDLED_FILES:
        extracted = os.path.join(target, name)
        shutil.copy2(os.path.join(source, name), extracted)
        open_with_default(extracted)


if __name__ == "__main__":
    main()
"#;
