//! Tessel CLI
//!
//! Generates JSON codecs from a type schema.

use tesselc::commands::{check_file, generate_file, plan_file};

fn main() {
    tesselc::init_tracing();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        return;
    }

    let command = &args[1];

    match command.as_str() {
        "generate" | "gen" => generate_file(&args[2..]),
        "check" => check_file(&args[2..]),
        "plan" => plan_file(&args[2..]),
        "help" | "--help" | "-h" => {
            print_usage();
        }
        "version" | "--version" | "-v" => {
            println!("Tessel {}", env!("CARGO_PKG_VERSION"));
        }
        _ => {
            eprintln!("Unknown command: {command}");
            eprintln!();
            print_usage();
            std::process::exit(1);
        }
    }
}

fn print_usage() {
    println!("Tessel JSON codec generator");
    println!();
    println!("Usage: tessel <command> <schema.json> [options]");
    println!();
    println!("Commands:");
    println!("  generate <schema>    Emit Rust codec source for the schema's roots");
    println!("  check <schema>       Report unsupported types without emitting");
    println!("  plan <schema>        Print the codec plans as JSON");
    println!("  help                 Show this help message");
    println!("  version              Show version information");
    println!();
    println!("Options:");
    println!("  -o <path>              Output file (default: stdout)");
    println!("  --tag=<member>         Polymorphic type tag member (default: _type_)");
    println!("  --suffix=<suffix>      Codec identity suffix (default: _JsonCodec)");
    println!("  --strip-prefix=<p>     Drop this field-name prefix on the wire");
    println!("  --error-limit=<n>      Diagnostics shown before summarizing (0: all)");
    println!();
    println!("Set RUST_LOG=debug to trace the generator.");
    println!();
    println!("Examples:");
    println!("  tessel generate zoo.json -o src/zoo_codecs.rs");
    println!("  tessel check zoo.json");
    println!("  tessel plan zoo.json --strip-prefix=my");
}
