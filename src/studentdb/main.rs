use clap::Parser;
use std::io::{self, Write};
use std::path::PathBuf;
use studentdb::api::{CmdResult, ConfigAction, StudentApi, StudentDbPaths};
use studentdb::config::{ConfigKey, StudentDbConfig};
use studentdb::error::Result;
use studentdb::model::{Field, SearchField, StudentId, StudentInput};
use studentdb::store::sqlite::SqliteStore;
use tracing_subscriber::EnvFilter;

mod args;
mod cli;
use args::{AddArgs, Cli, Commands};
use cli::menu::Menu;
use cli::render::{write_json, write_messages, write_student_detail, write_students};

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Logs go to stderr so they never mix with listings. `RUST_LOG` wins over `-v`.
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "studentdb=debug" } else { "studentdb=warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

struct AppContext {
    api: StudentApi<SqliteStore>,
    config: StudentDbConfig,
    json: bool,
}

fn run(cli: Cli) -> Result<()> {
    let mut ctx = init_context(&cli)?;

    match cli.command {
        Some(Commands::Menu) | None => handle_menu(&mut ctx),
        Some(Commands::List) => handle_list(&mut ctx),
        Some(Commands::Show { id }) => handle_show(&mut ctx, id),
        Some(Commands::Add(args)) => handle_add(&mut ctx, args),
        Some(Commands::Update { id, field, value }) => handle_update(&mut ctx, id, field, value),
        Some(Commands::Delete { ids }) => handle_delete(&mut ctx, ids),
        Some(Commands::Search { field, query }) => handle_search(&mut ctx, field, query),
        Some(Commands::Import { path }) => handle_import(&mut ctx, path),
        Some(Commands::Init) => handle_init(&mut ctx),
        Some(Commands::Config { key, value }) => handle_config(&mut ctx, key, value),
    }
}

fn init_context(cli: &Cli) -> Result<AppContext> {
    let home = std::env::var_os("STUDENTDB_HOME")
        .map(PathBuf::from)
        .or_else(|| std::env::current_dir().ok())
        .unwrap_or_else(|| PathBuf::from("."));

    let config = StudentDbConfig::load(&home)?;
    let database = cli
        .db
        .clone()
        .unwrap_or_else(|| config.database_path(&home));

    let store = SqliteStore::open(&database)?;
    let paths = StudentDbPaths { home, database };
    let api = StudentApi::new(store, paths);

    Ok(AppContext {
        api,
        config,
        json: cli.json,
    })
}

fn print_result(ctx: &AppContext, result: &CmdResult) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    if ctx.json {
        write_json(&mut out, result)?;
        return Ok(());
    }
    write_students(&mut out, &result.listed_students)?;
    write_messages(&mut out, &result.messages)?;
    out.flush()?;
    Ok(())
}

fn handle_menu(ctx: &mut AppContext) -> Result<()> {
    let import_path = ctx.config.import_path(&ctx.api.paths().home);
    let stdin = io::stdin();
    let stdout = io::stdout();
    Menu::new(&mut ctx.api, stdin.lock(), stdout.lock(), import_path).run()
}

fn handle_list(ctx: &mut AppContext) -> Result<()> {
    let result = ctx.api.list_students()?;
    print_result(ctx, &result)
}

fn handle_show(ctx: &mut AppContext, id: StudentId) -> Result<()> {
    let result = ctx.api.get_student(id)?;
    if ctx.json {
        return print_result(ctx, &result);
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();
    for student in &result.listed_students {
        write_student_detail(&mut out, student)?;
    }
    write_messages(&mut out, &result.messages)?;
    Ok(())
}

fn handle_add(ctx: &mut AppContext, args: AddArgs) -> Result<()> {
    let input = StudentInput {
        first_name: args.first_name,
        last_name: args.last_name,
        gpa: args.gpa,
        major: args.major,
        faculty_advisor: args.faculty_advisor,
        address: args.address,
        city: args.city,
        state: args.state,
        zip_code: args.zip_code,
        mobile_phone_number: args.mobile_phone_number,
    };
    let result = ctx.api.add_student(&input)?;
    print_result(ctx, &result)
}

fn handle_update(ctx: &mut AppContext, id: StudentId, field: Field, value: String) -> Result<()> {
    let result = ctx.api.update_student(id, field, &value)?;
    print_result(ctx, &result)
}

fn handle_delete(ctx: &mut AppContext, ids: Vec<StudentId>) -> Result<()> {
    for id in ids {
        let result = ctx.api.delete_student(id)?;
        print_result(ctx, &result)?;
    }
    Ok(())
}

fn handle_search(ctx: &mut AppContext, field: SearchField, query: String) -> Result<()> {
    let result = ctx.api.search_students(field, &query)?;
    print_result(ctx, &result)
}

fn handle_import(ctx: &mut AppContext, path: Option<PathBuf>) -> Result<()> {
    let path = path.unwrap_or_else(|| ctx.config.import_path(&ctx.api.paths().home));
    let result = ctx.api.import_students(&path)?;
    print_result(ctx, &result)
}

fn handle_init(ctx: &mut AppContext) -> Result<()> {
    let result = ctx.api.init()?;
    print_result(ctx, &result)
}

fn handle_config(ctx: &mut AppContext, key: Option<String>, value: Option<String>) -> Result<()> {
    let action = match (key, value) {
        (None, _) => ConfigAction::ShowAll,
        (Some(k), None) => ConfigAction::ShowKey(ConfigKey::parse(&k)?),
        (Some(k), Some(v)) => ConfigAction::Set(ConfigKey::parse(&k)?, v),
    };

    let result = ctx.api.config(action.clone())?;
    print_result(ctx, &result)?;

    if let (ConfigAction::ShowAll, Some(config)) = (action, &result.config) {
        for key in ConfigKey::ALL {
            println!("{} = {}", key.name(), config.get(key));
        }
    }
    Ok(())
}
