use spriteforge::logger::{self, LoggerConfig};
use spriteforge::{
    catalog, pack_all, OutputConfig, PackConfig, Pipeline, PipelineConfig, PixelLabClient,
    PixelLabConfig,
};
use std::env;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    logger::init_with_config(LoggerConfig::default())?;

    match dotenv::dotenv() {
        Ok(_) => log::info!("✅ .env file loaded"),
        Err(_) => log::warn!("⚠️  No .env file found, using system environment variables"),
    }

    let args: Vec<String> = env::args().skip(1).collect();
    let mode = args.first().map(String::as_str).unwrap_or("generate");

    match mode {
        "generate" => run_generate(&args).await,
        "pack" => run_pack(),
        "serve" => run_serve(&args).await,
        "-h" | "--help" | "help" => {
            print_usage();
            Ok(())
        }
        other => {
            log::error!("Unknown mode: {}", other);
            print_usage();
            std::process::exit(2);
        }
    }
}

fn print_usage() {
    println!("SpriteForge - pixel-art asset pipeline");
    println!();
    println!("Usage: spriteforge [MODE] [FLAGS]");
    println!();
    println!("Modes:");
    println!("  generate   Generate assets via the PixelLab API (default)");
    println!("             --characters-only   only character bases + animations");
    println!("             --effects-only      only effect sprites");
    println!("             --cutscenes-only    only cutscene illustrations");
    println!("  pack       Pack generated frames into sprite sheets + stage assets");
    println!("  serve      Serve the project directory for browser testing");
    println!("             (requires the `server` build feature; optional port arg)");
}

async fn run_generate(args: &[String]) -> Result<(), Box<dyn std::error::Error>> {
    let config = PixelLabConfig::from_env();
    let client = PixelLabClient::new(config)?;

    let pipeline = Pipeline::new(
        client,
        OutputConfig::default(),
        PipelineConfig::new().with_reference_image("sprites/reference/character_base.png"),
    );

    log::info!("🚀 SpriteForge generation run");
    log::info!(
        "Expected API calls for a full run: ~{}",
        catalog::expected_generation_count()
    );

    let timer = logger::timer("generation run");
    let report = if args.iter().any(|a| a == "--characters-only") {
        log::info!("*** Running CHARACTERS ONLY ***");
        pipeline.generate_characters().await
    } else if args.iter().any(|a| a == "--effects-only") {
        log::info!("*** Running EFFECTS ONLY ***");
        pipeline.generate_effects().await
    } else if args.iter().any(|a| a == "--cutscenes-only") {
        log::info!("*** Running CUTSCENES ONLY ***");
        pipeline.generate_cutscenes().await
    } else {
        pipeline.run_all().await
    };
    timer.stop();

    report.log_summary();
    Ok(())
}

fn run_pack() -> Result<(), Box<dyn std::error::Error>> {
    log::info!("🧩 SpriteForge sheet packer");
    let report = pack_all(&OutputConfig::default(), PackConfig::default());
    report.log_summary();
    Ok(())
}

#[cfg(feature = "server")]
async fn run_serve(args: &[String]) -> Result<(), Box<dyn std::error::Error>> {
    let port = args
        .get(1)
        .and_then(|p| p.parse().ok())
        .unwrap_or(8000u16);
    spriteforge::server::serve(".".into(), port).await?;
    Ok(())
}

#[cfg(not(feature = "server"))]
async fn run_serve(_args: &[String]) -> Result<(), Box<dyn std::error::Error>> {
    log::error!("This build does not include the dev server; rebuild with --features server");
    std::process::exit(2);
}
