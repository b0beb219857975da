//! Command-line front end: renders a post mockup to a PNG file.
//!
//! ```text
//! postmock --platform x --set name="Grace Hopper" --set likes=15300 --theme light
//! postmock --platform tiktok --thumbnail cover.jpg --out-dir out --svg
//! postmock --platform linkedin --input post.json --dump-json
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Parser;

use postmock::{
    Configurable, DirectorySink, ExportOutcome, FieldPatch, LocalFileReader, Platform,
    PostDocument, PostEditor, ResvgRasterizer, Theme, UploadSlot, export_preview, read_upload,
};

#[derive(Parser, Debug)]
#[command(name = "postmock", version, about = "Render social-media post mockups")]
struct Args {
    /// Which platform's post to render.
    #[arg(short, long, value_enum)]
    platform: Platform,

    /// JSON document to start from (see `--dump-json` for the format).
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Field assignment such as `name=Ada`, `verified=true` or `likes=1200`.
    /// May be repeated; applied after `--input`.
    #[arg(short, long = "set", value_name = "KEY=VALUE")]
    set: Vec<String>,

    /// Image file for the profile picture.
    #[arg(long)]
    avatar: Option<PathBuf>,

    /// Image file for the video thumbnail (TikTok).
    #[arg(long)]
    thumbnail: Option<PathBuf>,

    /// Preview theme; defaults to the platform's usual theme.
    #[arg(short, long, value_enum)]
    theme: Option<Theme>,

    /// Directory the export is written to.
    #[arg(short, long, default_value = ".")]
    out_dir: PathBuf,

    /// Also write the preview SVG next to the PNG.
    #[arg(long)]
    svg: bool,

    /// Print the final document as JSON instead of exporting.
    #[arg(long)]
    dump_json: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let mut editor = PostEditor::new(args.platform);

    if let Some(path) = &args.input {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        let document = PostDocument::from_json(&json)
            .with_context(|| format!("parsing {}", path.display()))?;
        editor.apply_document(&document)?;
    }

    for assignment in &args.set {
        let Some((key, value)) = assignment.split_once('=') else {
            bail!("expected KEY=VALUE, got `{assignment}`");
        };
        let patch = FieldPatch::parse_assignment(editor.descriptor(), key.trim(), value)?;
        editor.edit(patch)?;
    }

    for (slot, path) in [
        (UploadSlot::Avatar, &args.avatar),
        (UploadSlot::Thumbnail, &args.thumbnail),
    ] {
        let Some(path) = path else { continue };
        if let Some(patch) = read_upload(&LocalFileReader, slot, path.clone()).await {
            editor.edit(patch)?;
        }
    }

    if let Some(theme) = args.theme {
        editor.set_theme(theme);
    }

    if args.dump_json {
        println!("{}", editor.export_document().to_json_pretty()?);
        return Ok(());
    }

    let request = editor.export_request();
    if args.svg {
        if let Some(request) = &request {
            let name = request.filename.replace(".png", ".svg");
            let path = args.out_dir.join(name);
            std::fs::create_dir_all(&args.out_dir)?;
            std::fs::write(&path, request.preview.markup())
                .with_context(|| format!("writing {}", path.display()))?;
            log::info!("saved {}", path.display());
        }
    }

    let sink = DirectorySink::new(&args.out_dir);
    match export_preview(request, &ResvgRasterizer::new(), &sink).await {
        ExportOutcome::Saved(_) => Ok(()),
        ExportOutcome::NoPreview => bail!("nothing to export"),
        ExportOutcome::Failed => bail!("export failed; see log for details"),
    }
}
