use rowcard::html::HtmlRenderer;
use rowcard::request::CardRequest;
use std::env;
use std::fs;
use std::process;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: {} <request.json> [options]", args[0]);
        eprintln!();
        eprintln!("Options:");
        eprintln!("  -o, --output <file>   Output file (default: stdout)");
        eprintln!("  -j, --json            Emit the card view-model as JSON instead of HTML");
        eprintln!("  -l, --limit <n>       Secondary label limit");
        eprintln!("      --header          Render as a header card");
        process::exit(1);
    }

    let input_path = &args[1];
    let mut output_path: Option<String> = None;
    let mut json = false;
    let mut limit: Option<usize> = None;
    let mut header = false;

    let mut i = 2;
    while i < args.len() {
        match args[i].as_str() {
            "-o" | "--output" => {
                i += 1;
                if i < args.len() {
                    output_path = Some(args[i].clone());
                }
            }
            "-j" | "--json" => json = true,
            "-l" | "--limit" => {
                i += 1;
                if i < args.len() {
                    limit = Some(args[i].parse().unwrap_or_else(|_| {
                        eprintln!("Invalid limit: {}", args[i]);
                        process::exit(1);
                    }));
                }
            }
            "--header" => header = true,
            _ => {
                eprintln!("Unknown option: {}", args[i]);
                process::exit(1);
            }
        }
        i += 1;
    }

    let input = match fs::read_to_string(input_path) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Failed to read {}: {}", input_path, e);
            process::exit(1);
        }
    };

    let mut request = match CardRequest::from_json(&input) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("{}", e);
            process::exit(1);
        }
    };
    if limit.is_some() {
        request.options.secondary_label_limit = limit;
    }
    if header {
        request.render.is_header = true;
    }

    let output = if json {
        request.project().and_then(|card| {
            serde_json::to_string_pretty(&card).map_err(Into::into)
        })
    } else {
        request.render(&HtmlRenderer::default())
    };

    let output = match output {
        Ok(s) => s,
        Err(e) => {
            eprintln!("{}", e);
            process::exit(1);
        }
    };

    match output_path {
        Some(path) => {
            if let Err(e) = fs::write(&path, &output) {
                eprintln!("Failed to write {}: {}", path, e);
                process::exit(1);
            }
        }
        None => print!("{}", output),
    }
}
