use clap::Parser;
use repsheet_whitelist::{
    AllowListResolver, Decision,
    cli::{Args, Command, StoreLoader},
    error::WhitelistError,
    net::block_contains,
};

fn main() -> Result<(), WhitelistError> {
    env_logger::init();

    let args = Args::parse();
    let store = StoreLoader::load(&args)?;
    let resolver = AllowListResolver::new(store);

    let allowed = match &args.command {
        Command::Ip { address } => report(resolver.check_address(address)?),
        Command::User { id } => report(resolver.check_user(id)?),
        Command::Country { code } => report(resolver.check_country(code)?),
        Command::Contains { block, address } => {
            let contained = block_contains(block, address)?;
            println!("{}", if contained { "contained" } else { "not contained" });
            contained
        }
    };

    std::process::exit(if allowed { 0 } else { 1 });
}

fn report(decision: Decision) -> bool {
    match decision.reason() {
        Some(reason) => println!("allowed: {reason}"),
        None if decision.is_allowed() => println!("allowed"),
        None => println!("not allowed"),
    }
    decision.is_allowed()
}
