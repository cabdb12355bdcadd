//! Command-line print shell: renders a stored template against a JSON context.
//!
//! ```text
//! print_template <template-id> <context.json> [output.html]
//! print_template --list [surgery|followup]
//! ```

use std::env;
use std::fs;

use config::Config;
use dotenvy::dotenv;

use surgery_notes::domain::context::TemplateContext;
use surgery_notes::domain::print_template::TemplateType;
use surgery_notes::models::config::PrintConfig;
use surgery_notes::repository::DirectoryTemplateRepository;
use surgery_notes::services::print::{list_templates, print_template};

const USAGE: &str = "usage: print_template <template-id> <context.json> [output.html]\n       print_template --list [surgery|followup]";

fn load_config() -> Result<PrintConfig, config::ConfigError> {
    // Select config profile (defaults to `local`).
    let app_env = env::var("APP_ENV").unwrap_or_else(|_| "local".into());

    Config::builder()
        .add_source(config::File::with_name("config/default").required(false))
        .add_source(config::File::with_name(&format!("config/{}", app_env)).required(false))
        .add_source(config::Environment::with_prefix("APP"))
        .build()?
        .try_deserialize::<PrintConfig>()
}

fn parse_template_type(value: &str) -> Option<TemplateType> {
    match value {
        "surgery" => Some(TemplateType::Surgery),
        "followup" => Some(TemplateType::Followup),
        _ => None,
    }
}

fn run_list(filter: Option<&str>, repo: &DirectoryTemplateRepository) -> Result<(), String> {
    let template_type = match filter {
        Some(value) => Some(
            parse_template_type(value).ok_or_else(|| format!("unknown template type `{value}`"))?,
        ),
        None => None,
    };

    let templates = list_templates(template_type, repo).map_err(|e| e.to_string())?;
    for template in templates {
        let marker = if template.is_default { " (default)" } else { "" };
        println!(
            "{}\t{:?}\t{}{}",
            template.id, template.template_type, template.name, marker
        );
    }
    Ok(())
}

fn run_print(
    template_id: &str,
    context_path: &str,
    output: Option<&str>,
    config: &PrintConfig,
    repo: &DirectoryTemplateRepository,
) -> Result<(), String> {
    let source = fs::read_to_string(context_path)
        .map_err(|e| format!("Cannot read context {context_path}: {e}"))?;
    let context = TemplateContext::from_json(&source).map_err(|e| e.to_string())?;

    let document = print_template(template_id, &context, config, repo).map_err(|e| e.to_string())?;

    match output {
        Some(path) => {
            fs::write(path, &document.html).map_err(|e| format!("Cannot write {path}: {e}"))?;
            log::info!("Wrote {} to {path}", document.title);
        }
        None => print!("{}", document.html),
    }
    Ok(())
}

fn main() {
    dotenv().ok(); // Load .env file
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let config = match load_config() {
        Ok(config) => config,
        Err(err) => {
            log::error!("Error loading print config: {}", err);
            std::process::exit(1);
        }
    };

    let repo = DirectoryTemplateRepository::new(&config.templates_dir);
    log::debug!("Reading templates from {}", repo.root().display());

    let args: Vec<String> = env::args().skip(1).collect();
    let result = match args.as_slice() {
        [flag, rest @ ..] if flag == "--list" && rest.len() <= 1 => {
            run_list(rest.first().map(String::as_str), &repo)
        }
        [template_id, context_path] => run_print(template_id, context_path, None, &config, &repo),
        [template_id, context_path, output] => run_print(
            template_id,
            context_path,
            Some(output.as_str()),
            &config,
            &repo,
        ),
        _ => {
            eprintln!("{USAGE}");
            std::process::exit(2);
        }
    };

    if let Err(err) = result {
        log::error!("{err}");
        std::process::exit(1);
    }
}
