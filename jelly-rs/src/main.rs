use jelly::cli;
use jelly::Store;

fn main() {
    let args = match cli::parse_args() {
        Ok(a) => a,
        Err(e) => {
            eprintln!("jelly: {e}");
            eprintln!("{}", cli::USAGE);
            std::process::exit(1);
        }
    };

    let level = if args.debug { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let store = match Store::load_file(&args.file) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("jelly: {e}");
            std::process::exit(1);
        }
    };

    // ── No names: dump every declaration ──────────────────────────────────────
    if args.names.is_empty() {
        match store.resolve_all(args.mode) {
            Ok(all) => {
                for (name, value) in all {
                    println!("{name} = {value}");
                }
            }
            Err(e) => {
                eprintln!("jelly: {e}");
                std::process::exit(1);
            }
        }
        return;
    }

    // ── Resolve the requested names in order ──────────────────────────────────
    let resolver = jelly::Resolver::new(&store).with_mode(args.mode);
    for name in &args.names {
        match resolver.resolve(name) {
            Ok(value) => println!("{value}"),
            Err(e) => {
                eprintln!("jelly: {name}: {e}");
                std::process::exit(1);
            }
        }
    }
}
