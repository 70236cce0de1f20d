use std::env;
use std::fs;
use std::path::Path;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    copy_configs()?;
    Ok(())
}

/// Copies profile configs next to the built binary so `AppConfig::load`
/// finds them without a working directory
fn copy_configs() -> Result<(), Box<dyn std::error::Error>> {
    let out_dir = env::var("OUT_DIR")?;
    let profile = env::var("PROFILE")?;

    // OUT_DIR is like: target/debug/build/freelook-xxx/out
    let target_dir = Path::new(&out_dir)
        .parent()
        .and_then(|p| p.parent())
        .and_then(|p| p.parent())
        .ok_or("Could not determine target directory")?;

    let config_out_dir = target_dir.join("config");
    fs::create_dir_all(&config_out_dir)?;

    // Release builds ship only release.toml
    let names: &[&str] = if profile == "release" {
        &["release.toml"]
    } else {
        &["debug.toml", "release.toml"]
    };

    for name in names {
        let source = Path::new("config").join(name);
        println!("cargo:rerun-if-changed={}", source.display());
        if source.exists() {
            fs::copy(&source, config_out_dir.join(name))?;
        }
    }

    Ok(())
}
