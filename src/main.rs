//! persian-wordcloud: word clouds for Persian and English text

use clap::Parser;
use log::{debug, error, info};
use persian_wordcloud::cli::{self, Cli, Commands, ConfigAction, TextArgs};
use persian_wordcloud::input::InputManager;
use persian_wordcloud::output::{save_to_file, JsonFormatter, OutputFormatter};
use persian_wordcloud::text::TextPipeline;
use persian_wordcloud::{Config, Result, WordCloud, WordCloudError};
use std::process;
use unicode_segmentation::UnicodeSegmentation;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config = match Config::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = run_command(cli.command, config).await {
        error!("Command failed: {}", e);
        process::exit(1);
    }
}

async fn run_command(command: Commands, mut config: Config) -> Result<()> {
    match command {
        Commands::Generate {
            text,
            output,
            width,
            height,
            margin,
            max_words,
            min_font_size,
            max_font_size,
            scale,
            font,
            colormap,
            background,
            mask,
            seed,
            layout_json,
        } => {
            cli::validate_file_extension(&output, &["png"])
                .map_err(|e| WordCloudError::InvalidInput(format!("Output file: {}", e)))?;

            apply_text_args(&mut config, &text);
            if let Some(width) = width {
                config.canvas.width = width;
            }
            if let Some(height) = height {
                config.canvas.height = height;
            }
            if let Some(margin) = margin {
                config.canvas.margin = margin;
            }
            if let Some(scale) = scale {
                config.canvas.scale = scale;
            }
            if let Some(max_words) = max_words {
                config.layout.max_words = max_words;
            }
            if let Some(min_font_size) = min_font_size {
                config.layout.min_font_size = min_font_size;
            }
            if max_font_size.is_some() {
                config.layout.max_font_size = max_font_size;
            }
            if seed.is_some() {
                config.layout.random_state = seed;
            }
            if let Some(font) = font {
                config.font.font_path = Some(font);
            }
            if colormap.is_some() {
                config.color.colormap = colormap;
            }
            if let Some(background) = background {
                config.canvas.background_color = background;
            }
            if mask.is_some() {
                config.color.mask = mask;
            }

            let source = read_inputs(&text).await?;
            let mut wordcloud = WordCloud::new(config)?;
            let layout = wordcloud.generate(&source)?;
            info!("Placed {} words", layout.len());

            if let Some(layout_path) = layout_json {
                let json = JsonFormatter::new(true).format_layout(layout)?;
                save_to_file(&json, &layout_path)?;
                println!("Layout written to {}", layout_path.display());
            }

            wordcloud.to_file(&output)?;
            println!("Word cloud written to {}", output.display());
        }

        Commands::Words {
            text,
            format,
            top,
            save,
        } => {
            let output_format = cli::parse_output_format(&format).map_err(WordCloudError::InvalidInput)?;

            apply_text_args(&mut config, &text);
            config.validate()?;

            let source = read_inputs(&text).await?;
            let pipeline = TextPipeline::from_config(&config.text)?;
            let mut frequencies = pipeline.process_text(&source);
            if let Some(top) = top {
                frequencies = frequencies.top(top);
            }

            let formatter = output_format.formatter(save.is_none());
            let rendered = formatter.format_frequencies(&frequencies)?;
            match save {
                Some(path) => {
                    let path = output_format.file_path(&path);
                    save_to_file(&rendered, &path)?;
                    println!("Frequencies written to {}", path.display());
                }
                None => print!("{}", rendered),
            }
        }

        Commands::Config { action } => match action {
            Some(ConfigAction::Show) | None => {
                let content = toml::to_string_pretty(&config).map_err(|e| {
                    WordCloudError::Configuration(format!("Failed to serialize config: {}", e))
                })?;
                println!("{}", content);
            }

            Some(ConfigAction::Reset) => {
                Config::default().save()?;
                println!("Configuration reset to defaults at {}", Config::config_path().display());
            }

            Some(ConfigAction::Path) => {
                println!("{}", Config::config_path().display());
            }
        },
    }

    Ok(())
}

fn apply_text_args(config: &mut Config, args: &TextArgs) {
    if args.only_persian {
        config.text.only_persian = true;
    }
    if args.no_collocations {
        config.text.collocations = false;
    }
    if args.english_stopwords {
        config.text.include_english_stopwords = true;
    }
    if let Some(stopwords) = &args.stopwords {
        config.text.stopwords_file = Some(stopwords.clone());
    }
    if let Some(regexp) = &args.regexp {
        config.text.regexp = Some(regexp.clone());
    }
    config.text.extra_stopwords.extend(args.add_stopword.iter().cloned());
}

async fn read_inputs(args: &TextArgs) -> Result<String> {
    let mut input_manager = InputManager::new();
    let text = input_manager.extract_all(&args.input).await?;
    info!("Read {} characters from {} file(s)", text.chars().count(), args.input.len());
    debug!("Input preview: {}", truncate_text(&text, 120));
    Ok(text)
}

/// Truncate text to at most `max_graphemes` user-visible characters
fn truncate_text(text: &str, max_graphemes: usize) -> String {
    let mut graphemes = text.graphemes(true);
    let head: String = graphemes.by_ref().take(max_graphemes).collect();
    if graphemes.next().is_some() {
        format!("{}...", head)
    } else {
        head
    }
}
