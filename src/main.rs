//! craft's main application entry point.
//! Parses the command line, builds a project request and hands it to the orchestrator.

use craft::{
    cli::{get_args, Args, Command, NewArgs},
    config::load_settings,
    error::{default_error_handler, Error, Result},
    logger::init_logger,
    orchestrator::Orchestrator,
    recipes::Registry,
    request::ProjectRequest,
    source::TemplateSource,
};

/// Main application entry point.
fn main() {
    let args = get_args();
    init_logger(args.verbose);

    if let Err(err) = run(args) {
        default_error_handler(err);
    }
}

fn run(args: Args) -> Result<()> {
    match args.command {
        Command::New(new_args) => run_new(new_args),
    }
}

/// Creates a new project.
///
/// # Flow
/// 1. Loads the optional settings file from the working directory
/// 2. Builds the request from the project name or the working directory name
/// 3. Resolves the variant and runs every stage
/// 4. Reports where the project went and what was left behind
fn run_new(args: NewArgs) -> Result<()> {
    let cwd = std::env::current_dir()?;
    let settings = load_settings(&cwd)?.with_overrides(args.templates, args.generator_timeout);

    let (project_name, create_directory) = match args.name {
        Some(name) => (name, true),
        None => {
            let name = cwd
                .file_name()
                .and_then(|n| n.to_str())
                .ok_or_else(|| {
                    Error::ConfigurationError(format!(
                        "cannot derive a project name from '{}'",
                        cwd.display()
                    ))
                })?
                .to_string();
            (name, false)
        }
    };

    let request = ProjectRequest::new(&args.language, project_name, create_directory)
        .with_dependencies(&args.dependencies);

    let registry = Registry::default();
    let outcome = Orchestrator::new(request, &registry)?
        .with_template_source(TemplateSource::from_dir(settings.templates_dir.clone()))
        .with_generator_timeout(settings.generator_timeout())
        .in_dir(&cwd)
        .run()?;

    println!("The project directory: '{}'", outcome.project_dir.display());
    if outcome.cleanup_failures > 0 {
        println!(
            "{} transient file(s) could not be removed.",
            outcome.cleanup_failures
        );
    }
    println!("Project created successfully.");
    if let Some(image) = outcome.leftover_image {
        println!("The generator image '{image}' is still on this host.");
        println!("Remove it with 'docker image rm {image}'.");
    }
    Ok(())
}

