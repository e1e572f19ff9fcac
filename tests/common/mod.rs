//! Shared fixtures for the integration tests.
//!
//! The packaging tool is replaced by a POSIX shell script that honours the
//! same path flags as PyInstaller and records what it was asked to do.

#![allow(dead_code)]

use std::path::{Path, PathBuf};

/// How the fake packaging tool behaves.
#[derive(Clone, Copy)]
pub enum Behavior {
    /// Writes the executable and the usual build collaterals
    Succeed,
    /// Prints to stderr and exits 2 without producing anything
    Fail,
    /// Exits 0 but never writes the executable
    SucceedWithoutArtifact,
    /// Like `Succeed`, after sleeping for two seconds
    SucceedSlowly,
    /// Like `Succeed`, but the build descriptor is a directory
    SucceedWithSpecDirectory,
}

pub struct FakePackager {
    pub program: PathBuf,
    /// Everything the tool records lives here
    pub record_dir: PathBuf,
}

impl FakePackager {
    pub fn was_invoked(&self) -> bool {
        self.record_dir.join("args.log").exists()
    }

    /// Arguments of the last invocation, one per element.
    pub fn args(&self) -> Vec<String> {
        std::fs::read_to_string(self.record_dir.join("args.log"))
            .unwrap_or_default()
            .lines()
            .map(str::to_string)
            .collect()
    }

    /// Directory the tool was started in, which is the working directory.
    pub fn working_dir(&self) -> PathBuf {
        PathBuf::from(
            std::fs::read_to_string(self.record_dir.join("pwd.log"))
                .expect("packager recorded its directory")
                .trim(),
        )
    }

    pub fn launcher_source(&self) -> String {
        std::fs::read_to_string(self.record_dir.join("launcher.py")).expect("launcher captured")
    }

    pub fn staged(&self, name: &str) -> String {
        std::fs::read_to_string(self.record_dir.join("staged").join(name)).expect("staged file")
    }
}

/// Writes an executable fake packaging tool under `dir`.
#[cfg(unix)]
pub fn fake_packager(dir: &Path, behavior: Behavior) -> FakePackager {
    use std::os::unix::fs::PermissionsExt;

    let record_dir = dir.join("record");
    std::fs::create_dir_all(record_dir.join("staged")).unwrap();

    const SUCCEED: &str = r#"mkdir -p "$dist" "$work"
echo "intermediate" > "$work/xref.html"
echo "descriptor" > "$spec/$name.spec"
printf 'bound executable\n' > "$dist/$name"
exit 0"#;

    let tail = match behavior {
        Behavior::Succeed => SUCCEED.to_string(),
        Behavior::SucceedSlowly => format!("sleep 2\n{SUCCEED}"),
        Behavior::SucceedWithSpecDirectory => SUCCEED.replace(
            r#"echo "descriptor" > "$spec/$name.spec""#,
            r#"mkdir -p "$spec/$name.spec/nested""#,
        ),
        Behavior::Fail => r#"echo "ERROR: script compilation failed" >&2
exit 2"#
            .to_string(),
        Behavior::SucceedWithoutArtifact => "exit 0".to_string(),
    };

    let script = format!(
        r#"#!/bin/sh
record='{record}'
pwd -P > "$record/pwd.log"
: > "$record/args.log"
for arg in "$@"; do
    printf '%s\n' "$arg" >> "$record/args.log"
done
name=out; dist=dist; work=build; spec=.; last=
while [ $# -gt 0 ]; do
    case "$1" in
        --name) name="$2"; shift 2 ;;
        --distpath) dist="$2"; shift 2 ;;
        --workpath) work="$2"; shift 2 ;;
        --specpath) spec="$2"; shift 2 ;;
        --add-data) cp "${{2%:.}}" "$record/staged/"; shift 2 ;;
        *) last="$1"; shift ;;
    esac
done
cp "$last" "$record/launcher.py"
{tail}
"#,
        record = record_dir.display(),
    );

    let program = dir.join("fake-pyinstaller");
    std::fs::write(&program, script).unwrap();
    std::fs::set_permissions(&program, std::fs::Permissions::from_mode(0o755)).unwrap();

    FakePackager {
        program,
        record_dir,
    }
}

/// Creates `names` under `dir`, each containing its own name.
pub fn write_inputs(dir: &Path, names: &[&str]) -> Vec<PathBuf> {
    names
        .iter()
        .map(|name| {
            let path = dir.join(name);
            std::fs::write(&path, format!("contents of {name}")).unwrap();
            path
        })
        .collect()
}

/// Smallest valid ICO: header plus one 1x1 32-bit BMP entry.
pub fn tiny_ico() -> Vec<u8> {
    let mut ico = vec![0, 0, 1, 0, 1, 0];
    ico.extend_from_slice(&[1, 1, 0, 0, 1, 0, 32, 0]);
    ico.extend_from_slice(&48u32.to_le_bytes());
    ico.extend_from_slice(&22u32.to_le_bytes());
    ico.extend_from_slice(&40u32.to_le_bytes());
    ico.extend_from_slice(&1i32.to_le_bytes());
    ico.extend_from_slice(&2i32.to_le_bytes());
    ico.extend_from_slice(&1u16.to_le_bytes());
    ico.extend_from_slice(&32u16.to_le_bytes());
    ico.extend_from_slice(&[0; 24]);
    ico.extend_from_slice(&[0, 0, 255, 255]);
    ico.extend_from_slice(&[0; 4]);
    ico
}
