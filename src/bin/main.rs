//! Xrplend CLI - ledger queries and payload building
//!
//! Ledger queries (mock-backed):
//!   xrplend networks                 → configured networks + endpoints
//!   xrplend account <address>        → account_info
//!   xrplend lines <address>          → trust lines
//!   xrplend tx <hash>                → transaction lookup
//!
//! Wallets:
//!   xrplend wallets                  → registry with availability
//!   xrplend session                  → restore + show the saved session
//!
//! Payload building (no signing, no submission):
//!   xrplend build trust-set <account> [--issuer r...] [--limit 1000000]
//!   xrplend build deposit <account> <value> [--pool r...] [--issuer r...]
//!   xrplend build escrow <account> <drops> <finish> <cancel> [--pool r...]
//!   xrplend build repay <account> <value> [--pool r...] [--issuer r...]
//!   xrplend convert <xrp>            → drops and back
//!
//! Output format:
//!   --json     Raw JSON (default for non-tty)
//!   --pretty   Pretty-print JSON (default for tty)

use serde_json::{json, Value};
use std::env;
use std::io::IsTerminal;

use xrplend::config::{Network, ProtocolConfig};
use xrplend::ledger::LedgerService;
use xrplend::logging::init_logging;
use xrplend::storage::FileStorage;
use xrplend::tx;
use xrplend::wallet::{WalletRegistry, WalletSession};

fn main() {
    init_logging();

    let args: Vec<String> = env::args().collect();
    let opts = ParsedArgs::parse(&args[1..]);

    if opts.help {
        print_usage();
        return;
    }
    if opts.version {
        println!("xrplend 0.1.0");
        return;
    }

    let result = match opts.command.as_deref() {
        Some("networks") => cmd_networks(),
        Some("account") => cmd_account(&opts),
        Some("lines") => cmd_lines(&opts),
        Some("tx") => cmd_tx(&opts),
        Some("wallets") => cmd_wallets(),
        Some("session") => cmd_session(),
        Some("build") => cmd_build(&opts),
        Some("convert") => cmd_convert(&opts),
        Some(cmd) => Err(format!("Unknown command: {}", cmd)),
        None => {
            print_usage();
            return;
        }
    };

    match result {
        Ok(output) => {
            let formatted = if opts.pretty || (!opts.json && std::io::stdout().is_terminal()) {
                serde_json::to_string_pretty(&output)
            } else {
                serde_json::to_string(&output)
            };
            match formatted {
                Ok(s) => println!("{}", s),
                Err(e) => {
                    eprintln!("{{\"error\": \"{}\"}}", e);
                    std::process::exit(1);
                }
            }
        }
        Err(e) => {
            eprintln!("{}", json!({ "error": e }));
            std::process::exit(1);
        }
    }
}

fn block_on<F: std::future::Future>(fut: F) -> Result<F::Output, String> {
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| format!("Runtime: {}", e))?;
    Ok(rt.block_on(fut))
}

fn cmd_networks() -> Result<Value, String> {
    let nets: Vec<Value> = [Network::Mainnet, Network::Testnet, Network::Devnet]
        .iter()
        .map(|net| {
            let cfg = net.config();
            json!({
                "network": net.as_str(),
                "name": cfg.name,
                "servers": cfg.servers,
                "explorer": cfg.explorer,
                "faucet": cfg.faucet,
            })
        })
        .collect();
    Ok(json!({ "networks": nets }))
}

fn cmd_account(opts: &ParsedArgs) -> Result<Value, String> {
    let address = opts.positional(0).ok_or("Usage: xrplend account <address>")?;
    let ledger = LedgerService::new(opts.network());
    let info = block_on(ledger.account_info(address))?.map_err(|e| e.to_string())?;
    serde_json::to_value(info).map_err(|e| e.to_string())
}

fn cmd_lines(opts: &ParsedArgs) -> Result<Value, String> {
    let address = opts.positional(0).ok_or("Usage: xrplend lines <address>")?;
    let ledger = LedgerService::new(opts.network());
    let lines = block_on(ledger.account_lines(address))?.map_err(|e| e.to_string())?;
    serde_json::to_value(lines).map_err(|e| e.to_string())
}

fn cmd_tx(opts: &ParsedArgs) -> Result<Value, String> {
    let hash = opts.positional(0).ok_or("Usage: xrplend tx <hash>")?;
    let ledger = LedgerService::new(opts.network());
    match block_on(ledger.transaction(hash))?.map_err(|e| e.to_string())? {
        Some(result) => {
            let explorer = ledger.explorer_url(Some(&result.hash));
            let mut v = serde_json::to_value(result).map_err(|e| e.to_string())?;
            v["explorer"] = json!(explorer);
            Ok(v)
        }
        None => Ok(json!({ "found": false, "hash": hash })),
    }
}

fn cmd_wallets() -> Result<Value, String> {
    let registry = WalletRegistry::detect();
    let wallets: Vec<Value> = registry
        .adapters()
        .iter()
        .map(|a| json!({"id": a.id().as_str(), "name": a.name(), "available": a.is_available()}))
        .collect();
    Ok(json!({ "wallets": wallets }))
}

fn cmd_session() -> Result<Value, String> {
    let storage = FileStorage::open("xrplend").map_err(|e| format!("Storage: {}", e))?;
    let registry = std::sync::Arc::new(WalletRegistry::detect());
    let session = WalletSession::new(registry, std::sync::Arc::new(storage));
    let snapshot = block_on(async {
        let outcome = session.restore().await;
        (format!("{:?}", outcome), session.snapshot().await)
    })?;
    let (outcome, snap) = snapshot;
    let mut v = serde_json::to_value(snap).map_err(|e| e.to_string())?;
    v["restore"] = json!(outcome);
    Ok(v)
}

fn cmd_build(opts: &ParsedArgs) -> Result<Value, String> {
    let kind = opts.positional(0).ok_or("Usage: xrplend build <trust-set|deposit|escrow|repay> ...")?;
    let account = opts.positional(1).ok_or("Missing account argument")?;
    let protocol = opts.protocol();

    let payload = match kind {
        "trust-set" => {
            let limit = opts.limit.as_deref().unwrap_or(tx::DEFAULT_TRUST_LIMIT);
            tx::trust_set(account, &protocol.currency, &opts.issuer(&protocol)?, limit)
        }
        "deposit" => {
            let value = opts.positional(2).ok_or("Missing amount argument")?;
            let amount = tx::IssuedAmount::new(&protocol.currency, opts.issuer(&protocol)?, value);
            tx::deposit(account, &opts.pool(&protocol)?, amount)
        }
        "escrow" => {
            let drops = opts.positional(2).ok_or("Missing drops argument")?;
            let finish = opts.parse_positional(3, "finish-after")?;
            let cancel = opts.parse_positional(4, "cancel-after")?;
            tx::escrow_create(account, &opts.pool(&protocol)?, drops, finish, cancel)
        }
        "repay" => {
            let value = opts.positional(2).ok_or("Missing amount argument")?;
            let amount = tx::IssuedAmount::new(&protocol.currency, opts.issuer(&protocol)?, value);
            tx::repay(account, &opts.pool(&protocol)?, amount)
        }
        other => return Err(format!("Unknown build kind: {}", other)),
    };

    Ok(payload.to_value())
}

fn cmd_convert(opts: &ParsedArgs) -> Result<Value, String> {
    let raw = opts.positional(0).ok_or("Usage: xrplend convert <xrp>")?;
    let xrp: f64 = raw.parse().map_err(|_| format!("Not a number: {}", raw))?;
    let drops = tx::xrp_to_drops(xrp);
    Ok(json!({ "xrp": xrp, "drops": drops, "back": tx::drops_to_xrp(&drops) }))
}

#[derive(Default)]
struct ParsedArgs {
    command: Option<String>,
    rest: Vec<String>,
    network: Option<String>,
    issuer: Option<String>,
    pool: Option<String>,
    currency: Option<String>,
    limit: Option<String>,
    json: bool,
    pretty: bool,
    help: bool,
    version: bool,
}

impl ParsedArgs {
    fn parse(args: &[String]) -> Self {
        let mut opts = ParsedArgs::default();
        let mut positional = Vec::new();
        let mut i = 0;

        while i < args.len() {
            let arg = &args[i];
            match arg.as_str() {
                "--help" | "-h" => opts.help = true,
                "--version" | "-V" => opts.version = true,
                "--json" => opts.json = true,
                "--pretty" => opts.pretty = true,
                "--network" | "-n" => {
                    if i + 1 < args.len() {
                        opts.network = Some(args[i + 1].clone());
                        i += 1;
                    }
                }
                "--issuer" => {
                    if i + 1 < args.len() {
                        opts.issuer = Some(args[i + 1].clone());
                        i += 1;
                    }
                }
                "--pool" => {
                    if i + 1 < args.len() {
                        opts.pool = Some(args[i + 1].clone());
                        i += 1;
                    }
                }
                "--currency" => {
                    if i + 1 < args.len() {
                        opts.currency = Some(args[i + 1].clone());
                        i += 1;
                    }
                }
                "--limit" => {
                    if i + 1 < args.len() {
                        opts.limit = Some(args[i + 1].clone());
                        i += 1;
                    }
                }
                _ if !arg.starts_with('-') => positional.push(arg.clone()),
                _ => {} // Ignore unknown flags
            }
            i += 1;
        }

        if !positional.is_empty() {
            opts.command = Some(positional.remove(0));
        }
        opts.rest = positional;
        opts
    }

    fn positional(&self, index: usize) -> Option<&str> {
        self.rest.get(index).map(String::as_str)
    }

    fn parse_positional(&self, index: usize, name: &str) -> Result<u64, String> {
        self.positional(index)
            .ok_or_else(|| format!("Missing {} argument", name))?
            .parse()
            .map_err(|_| format!("Invalid {} (expected epoch seconds)", name))
    }

    fn network(&self) -> Network {
        self.network
            .as_deref()
            .and_then(Network::from_str)
            .unwrap_or_else(|| ProtocolConfig::from_env().network)
    }

    fn protocol(&self) -> ProtocolConfig {
        let mut protocol = ProtocolConfig::from_env();
        if let Some(currency) = &self.currency {
            protocol.currency = currency.clone();
        }
        protocol
    }

    fn issuer(&self, protocol: &ProtocolConfig) -> Result<String, String> {
        self.issuer
            .clone()
            .or_else(|| (!protocol.issuer.is_empty()).then(|| protocol.issuer.clone()))
            .ok_or_else(|| "No issuer (--issuer or XRPLEND_ISSUER)".into())
    }

    fn pool(&self, protocol: &ProtocolConfig) -> Result<String, String> {
        self.pool
            .clone()
            .or_else(|| (!protocol.pool_address.is_empty()).then(|| protocol.pool_address.clone()))
            .ok_or_else(|| "No pool address (--pool or XRPLEND_POOL)".into())
    }
}

fn print_usage() {
    println!(
        r#"xrplend - XRPL lending wallet core

USAGE:
    xrplend <command> [args] [options]

COMMANDS:
    networks                        List configured networks
    account <address>               Account info (mock-backed)
    lines <address>                 Trust lines (mock-backed)
    tx <hash>                       Transaction lookup (mock-backed)
    wallets                         List wallet adapters + availability
    session                         Restore and show the saved session
    build trust-set <account>       TrustSet payload
    build deposit <account> <value> Pool deposit payload
    build escrow <account> <drops> <finish> <cancel>
                                    Collateral escrow payload
    build repay <account> <value>   Loan repayment payload
    convert <xrp>                   XRP ↔ drops

OPTIONS:
    --network, -n <net>     mainnet|testnet|devnet (env: XRPLEND_NETWORK)
    --issuer <r...>         Issuer account (env: XRPLEND_ISSUER)
    --pool <r...>           Pool account (env: XRPLEND_POOL)
    --currency <code>       Currency code (default RLUSD, env: XRPLEND_CURRENCY)
    --limit <value>         Trust line limit (default 1000000)

OUTPUT OPTIONS:
    --json                  Raw JSON output
    --pretty                Pretty-print JSON
    --version, -V           Print version

EXAMPLES:
    xrplend account rN7n7otQDd6FczFgLdSqtcsAUxDkw6fzRH
    xrplend build trust-set rACCOUNT --issuer rISSUER --limit 500000
    xrplend build escrow rACCOUNT 5000000 1700000000 1702600000 --pool rPOOL
    xrplend convert 12.5 --json
"#
    );
}
