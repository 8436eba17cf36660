//! Workspace build tasks.
//!
//! `cargo xtask web` compiles the client for the browser and writes `client.js`,
//! `client_bg.wasm` and the client's assets into `public/`, where the server picks them up.
//! Needs the `wasm32-unknown-unknown` target and the `wasm-bindgen` CLI on `PATH`.

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};

const WASM_TARGET: &str = "wasm32-unknown-unknown";

/// Module name `public/index.html` imports (`./client.js`).
const OUT_NAME: &str = "client";

#[derive(Parser)]
#[command(about = "Avatar Plaza build tasks")]
struct Cli {
    #[command(subcommand)]
    task: Task,
}

#[derive(Subcommand)]
enum Task {
    /// Build the browser client into `public/`.
    Web {
        /// Optimised build.
        #[arg(long)]
        release: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    match cli.task {
        Task::Web { release } => build_web(&workspace_root(), release),
    }
}

fn workspace_root() -> PathBuf {
    let manifest = Path::new(env!("CARGO_MANIFEST_DIR"));
    manifest.parent().unwrap_or(manifest).to_path_buf()
}

fn build_web(root: &Path, release: bool) -> Result<()> {
    let cargo = std::env::var_os("CARGO").unwrap_or_else(|| "cargo".into());
    run(Command::new(cargo)
        .current_dir(root)
        .args(cargo_build_args(release)))?;

    let target_dir = std::env::var_os("CARGO_TARGET_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|| root.join("target"));
    let wasm = wasm_artifact(&target_dir, release);
    if !wasm.is_file() {
        bail!("expected wasm artifact at {}", wasm.display());
    }

    let public = root.join("public");
    run(Command::new("wasm-bindgen")
        .current_dir(root)
        .args(wasm_bindgen_args(&wasm, &public)))?;

    let copied = copy_dir_all(&root.join("client/assets"), &public.join("assets"))?;
    println!("Copied {copied} asset files");
    println!("Web build written to {}", public.display());
    Ok(())
}

fn run(command: &mut Command) -> Result<()> {
    println!("> {command:?}");
    let status = command
        .status()
        .with_context(|| format!("failed to start {:?}", command.get_program()))?;
    if !status.success() {
        bail!("{:?} exited with {status}", command.get_program());
    }
    Ok(())
}

fn cargo_build_args(release: bool) -> Vec<&'static str> {
    let mut args = vec!["build", "--package", "client", "--target", WASM_TARGET];
    if release {
        args.push("--release");
    }
    args
}

/// Where cargo leaves the client binary for the wasm target.
fn wasm_artifact(target_dir: &Path, release: bool) -> PathBuf {
    let profile = if release { "release" } else { "debug" };
    target_dir
        .join(WASM_TARGET)
        .join(profile)
        .join(format!("{OUT_NAME}.wasm"))
}

fn wasm_bindgen_args(wasm: &Path, out_dir: &Path) -> Vec<OsString> {
    vec![
        "--target".into(),
        "web".into(),
        "--no-typescript".into(),
        "--out-name".into(),
        OUT_NAME.into(),
        "--out-dir".into(),
        out_dir.into(),
        wasm.into(),
    ]
}

/// Recursively copy `src` into `dst`, returning the number of files copied. A missing `src`
/// copies nothing.
fn copy_dir_all(src: &Path, dst: &Path) -> Result<usize> {
    if !src.is_dir() {
        return Ok(0);
    }
    fs::create_dir_all(dst).with_context(|| format!("creating {}", dst.display()))?;

    let mut copied = 0;
    for entry in fs::read_dir(src).with_context(|| format!("reading {}", src.display()))? {
        let entry = entry?;
        let from = entry.path();
        let to = dst.join(entry.file_name());
        if entry.file_type()?.is_dir() {
            copied += copy_dir_all(&from, &to)?;
        } else {
            fs::copy(&from, &to)
                .with_context(|| format!("copying {} to {}", from.display(), to.display()))?;
            copied += 1;
        }
    }
    Ok(copied)
}
