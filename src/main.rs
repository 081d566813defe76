//! Token-Ledger CLI Application
//!
//! A command-line interface for deploying and operating the token ledger.
//! Every state-changing command loads the ledger from disk, applies one
//! operation, and saves it back, so invocations are serialized through the
//! ledger file.

use clap::{Parser, Subcommand};
use token_ledger::{Address, CustomToken, Storage, StorageConfig, TokenMetadata};

#[derive(Parser)]
#[command(name = "token-ledger")]
#[command(version = "0.1.0")]
#[command(about = "A minimal fungible-token ledger with single-owner access control", long_about = None)]
struct Cli {
    /// Data directory for ledger storage
    #[arg(short, long, default_value = ".token_ledger_data")]
    data_dir: std::path::PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Deploy a new token ledger
    Init {
        /// Token name
        #[arg(long)]
        name: String,

        /// Token symbol
        #[arg(long)]
        symbol: String,

        /// Decimal places
        #[arg(long, default_value = "18")]
        decimals: u8,

        /// Deployer address (becomes the admin)
        #[arg(long)]
        admin: String,
    },

    /// Show token info, admin, and minters
    Info,

    /// Derive a fresh account address
    Account {
        #[command(subcommand)]
        action: AccountCommands,
    },

    /// Show the balance of an address
    Balance {
        /// Account address
        #[arg(long)]
        address: String,
    },

    /// Show the allowance granted by an owner to a spender
    Allowance {
        /// Owner address
        #[arg(long)]
        owner: String,

        /// Spender address
        #[arg(long)]
        spender: String,
    },

    /// List recent ledger events
    Events {
        /// Number of events to show
        #[arg(short, long, default_value = "20")]
        count: usize,
    },

    /// Mint new tokens (caller must be an authorized minter)
    Mint {
        /// Calling address
        #[arg(long)]
        caller: String,

        /// Recipient address
        #[arg(long)]
        to: String,

        /// Amount to mint
        #[arg(long)]
        amount: u128,
    },

    /// Burn tokens (caller must be the admin)
    Burn {
        /// Calling address
        #[arg(long)]
        caller: String,

        /// Address to burn from
        #[arg(long)]
        from: String,

        /// Amount to burn
        #[arg(long)]
        amount: u128,
    },

    /// Transfer tokens from the caller to a recipient
    Transfer {
        /// Calling address (the sender)
        #[arg(long)]
        caller: String,

        /// Recipient address
        #[arg(long)]
        to: String,

        /// Amount to transfer
        #[arg(long)]
        amount: u128,
    },

    /// Set an allowance for a spender (absolute, overwrites)
    Approve {
        /// Calling address (the owner)
        #[arg(long)]
        caller: String,

        /// Spender address
        #[arg(long)]
        spender: String,

        /// Allowance amount
        #[arg(long)]
        amount: u128,
    },

    /// Transfer on the strength of a prior approval
    TransferFrom {
        /// Calling address (the approved spender)
        #[arg(long)]
        caller: String,

        /// Owner address to move tokens from
        #[arg(long)]
        from: String,

        /// Recipient address
        #[arg(long)]
        to: String,

        /// Amount to transfer
        #[arg(long)]
        amount: u128,
    },

    /// Admin and minter-set operations
    Admin {
        #[command(subcommand)]
        action: AdminCommands,
    },
}

#[derive(Subcommand)]
enum AccountCommands {
    /// Derive a new address from a label
    New {
        /// Human-readable label to derive from
        #[arg(short, long)]
        label: String,
    },
}

#[derive(Subcommand)]
enum AdminCommands {
    /// Show the current admin and minter set
    Show,

    /// Hand the admin role to a successor (caller must be the admin)
    Change {
        /// Calling address
        #[arg(long)]
        caller: String,

        /// New admin address
        #[arg(long)]
        new_admin: String,
    },

    /// Authorize a minter (caller must be the admin)
    AddMinter {
        /// Calling address
        #[arg(long)]
        caller: String,

        /// Minter address
        #[arg(long)]
        minter: String,
    },

    /// Revoke a minter (caller must be the admin; no-op if not a minter)
    RemoveMinter {
        /// Calling address
        #[arg(long)]
        caller: String,

        /// Minter address
        #[arg(long)]
        minter: String,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logger
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let storage = Storage::new(StorageConfig {
        data_dir: cli.data_dir.clone(),
        ..Default::default()
    })?;

    match cli.command {
        Commands::Init {
            name,
            symbol,
            decimals,
            admin,
        } => cmd_init(&storage, name, symbol, decimals, &admin)?,

        Commands::Account {
            action: AccountCommands::New { label },
        } => {
            let nonce = chrono::Utc::now().timestamp_nanos_opt().unwrap_or_default() as u64;
            let address = Address::derive(&label, nonce);
            println!("🔑 New account '{}': {}", label, address);
        }

        Commands::Info => {
            let token = load_ledger(&storage)?;
            let info = token.token_info();
            println!("🪙 {} ({})", info.name, info.symbol);
            println!("   Decimals:     {}", info.decimals);
            println!("   Total supply: {}", info.total_supply);
            println!("   Admin:        {}", token.admin());
            println!("   Minters:      {}", token.minters().len());
            println!("   Holders:      {}", token.holders().len());
        }

        Commands::Balance { address } => {
            let token = load_ledger(&storage)?;
            let address = Address::new(&address);
            println!(
                "💰 Balance of {}: {} {}",
                address,
                token.balance_of(&address),
                token.symbol()
            );
        }

        Commands::Allowance { owner, spender } => {
            let token = load_ledger(&storage)?;
            let owner = Address::new(&owner);
            let spender = Address::new(&spender);
            println!(
                "🔓 Allowance {} -> {}: {} {}",
                owner,
                spender,
                token.allowance(&owner, &spender),
                token.symbol()
            );
        }

        Commands::Events { count } => {
            let token = load_ledger(&storage)?;
            let events = token.events();
            if events.is_empty() {
                println!("📭 No events recorded yet.");
            } else {
                let shown = events.iter().rev().take(count).collect::<Vec<_>>();
                println!("📋 Recent events (newest first):");
                for record in shown {
                    println!("   {}  {}", record.timestamp.format("%Y-%m-%d %H:%M:%S"), record.kind);
                }
            }
        }

        Commands::Mint { caller, to, amount } => {
            let mut token = load_ledger(&storage)?;
            let records = token.mint(&Address::new(&caller), &Address::new(&to), amount)?;
            storage.save(&token)?;
            println!("✅ Minted {} {} to {}", amount, token.symbol(), Address::new(&to));
            print_records(&records);
        }

        Commands::Burn {
            caller,
            from,
            amount,
        } => {
            let mut token = load_ledger(&storage)?;
            let records = token.burn(&Address::new(&caller), &Address::new(&from), amount)?;
            storage.save(&token)?;
            println!(
                "🔥 Burned {} {} from {}",
                amount,
                token.symbol(),
                Address::new(&from)
            );
            print_records(&records);
        }

        Commands::Transfer { caller, to, amount } => {
            let mut token = load_ledger(&storage)?;
            let record = token.transfer(&Address::new(&caller), &Address::new(&to), amount)?;
            storage.save(&token)?;
            println!("✅ {}", record.kind);
        }

        Commands::Approve {
            caller,
            spender,
            amount,
        } => {
            let mut token = load_ledger(&storage)?;
            let record = token.approve(&Address::new(&caller), &Address::new(&spender), amount)?;
            storage.save(&token)?;
            println!("✅ {}", record.kind);
        }

        Commands::TransferFrom {
            caller,
            from,
            to,
            amount,
        } => {
            let mut token = load_ledger(&storage)?;
            let record = token.transfer_from(
                &Address::new(&caller),
                &Address::new(&from),
                &Address::new(&to),
                amount,
            )?;
            storage.save(&token)?;
            println!("✅ {}", record.kind);
        }

        Commands::Admin { action } => match action {
            AdminCommands::Show => {
                let token = load_ledger(&storage)?;
                println!("👤 Admin: {}", token.admin());
                let minters = token.minters();
                if minters.is_empty() {
                    println!("   No authorized minters.");
                } else {
                    println!("   Minters ({}):", minters.len());
                    for minter in minters {
                        println!("   - {}", minter);
                    }
                }
            }

            AdminCommands::Change { caller, new_admin } => {
                let mut token = load_ledger(&storage)?;
                let record =
                    token.change_admin(&Address::new(&caller), &Address::new(&new_admin))?;
                storage.save(&token)?;
                println!("✅ {}", record.kind);
            }

            AdminCommands::AddMinter { caller, minter } => {
                let mut token = load_ledger(&storage)?;
                let record = token.add_minter(&Address::new(&caller), &Address::new(&minter))?;
                storage.save(&token)?;
                match record {
                    Some(record) => println!("✅ {}", record.kind),
                    None => println!("ℹ️  {} is already a minter.", Address::new(&minter)),
                }
            }

            AdminCommands::RemoveMinter { caller, minter } => {
                let mut token = load_ledger(&storage)?;
                let record = token.remove_minter(&Address::new(&caller), &Address::new(&minter))?;
                storage.save(&token)?;
                match record {
                    Some(record) => println!("✅ {}", record.kind),
                    None => println!("ℹ️  {} was not a minter.", Address::new(&minter)),
                }
            }
        },
    }

    Ok(())
}

/// Deploy a fresh ledger, refusing to clobber an existing one.
fn cmd_init(
    storage: &Storage,
    name: String,
    symbol: String,
    decimals: u8,
    admin: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    if storage.exists() {
        println!("⚠️  A ledger already exists in this data directory.");
        println!("   Delete the ledger file first to redeploy.");
        return Ok(());
    }

    let metadata = TokenMetadata::new(name, symbol, decimals, Address::new(admin))?;
    let token = CustomToken::new(metadata)?;
    storage.save(&token)?;

    println!("🆕 Deployed {} ({})", token.name(), token.symbol());
    println!("   Admin: {}", token.admin());
    Ok(())
}

fn load_ledger(storage: &Storage) -> Result<CustomToken, Box<dyn std::error::Error>> {
    if !storage.exists() {
        println!("❌ No ledger found. Run 'token-ledger init' first.");
        return Err("ledger not initialized".into());
    }
    Ok(storage.load()?)
}

fn print_records(records: &[token_ledger::EventRecord]) {
    for record in records {
        println!("   event: {}", record.kind);
    }
}
