use clap::{Parser, Subcommand};
use foodie::client::{
    api::{
        ApiClient, MenuOutcome, PaymentOutcome, RegisterOutcome, SendOtpOutcome, VerifyOtpOutcome,
    },
    checkout::CardDetails,
    flow::{AuthFlow, AuthStage},
    state::ClientState,
};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "foodie-cli")]
#[command(about = "Order food from the terminal", long_about = None)]
struct Cli {
    /// Server base URL (defaults to FOODIE_API_URL or http://localhost:3000)
    #[arg(long)]
    api_url: Option<String>,

    /// Client state file (defaults to FOODIE_STATE or .foodie-state.json)
    #[arg(long)]
    state_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create an account
    Register {
        /// Display name
        #[arg(short, long)]
        name: String,

        /// Email address
        #[arg(short, long)]
        email: String,

        /// Password (will prompt if not provided)
        #[arg(short, long)]
        password: Option<String>,
    },

    /// Start logging in: a one-time code is emailed to you
    Login {
        /// Email address
        email: String,
    },

    /// Finish logging in with the emailed code
    Verify {
        /// The 6-digit code
        code: String,
    },

    /// Show who is logged in
    Whoami,

    /// Log out and forget the session
    Logout,

    /// Browse the menu
    Menu {
        /// Vegetarian items only
        #[arg(long, conflicts_with = "non_veg")]
        veg: bool,

        /// Non-vegetarian items only
        #[arg(long)]
        non_veg: bool,

        /// Case-insensitive search over name and description
        #[arg(short, long)]
        search: Option<String>,
    },

    /// Manage the cart
    Cart {
        #[command(subcommand)]
        command: CartCommands,
    },

    /// Pay for the cart (mock payment)
    Checkout {
        /// Card number (16 digits)
        #[arg(long)]
        card: String,

        /// Expiry, MM/YY
        #[arg(long)]
        expiry: String,

        /// CVV (will prompt if not provided)
        #[arg(long)]
        cvv: Option<String>,
    },
}

#[derive(Subcommand)]
enum CartCommands {
    /// Add a menu item by id
    Add {
        item_id: i64,

        #[arg(short, long, default_value_t = 1)]
        quantity: u32,
    },

    /// Remove a menu item by id
    Remove { item_id: i64 },

    /// Show the cart
    Show,

    /// Empty the cart
    Clear,
}

fn get_secret(prompt: &str) -> Result<String, Box<dyn std::error::Error>> {
    use std::io::{self, Write};
    print!("{}: ", prompt);
    io::stdout().flush()?;

    Ok(rpassword::read_password()?)
}

fn fail(message: impl std::fmt::Display) -> ! {
    eprintln!("❌ {}", message);
    std::process::exit(1);
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let api_url = cli
        .api_url
        .or_else(|| std::env::var("FOODIE_API_URL").ok())
        .unwrap_or_else(|| "http://localhost:3000".to_string());
    let state_file = cli
        .state_file
        .or_else(|| std::env::var("FOODIE_STATE").ok().map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(".foodie-state.json"));

    let api = ApiClient::new(api_url);
    let mut state = ClientState::load(&state_file);

    match cli.command {
        Commands::Register {
            name,
            email,
            password,
        } => {
            let password = match password {
                Some(pw) => pw,
                None => get_secret("Password")?,
            };

            match api.register(&name, &email, &password).await? {
                RegisterOutcome::Registered { message } => {
                    println!("✅ {}", message);
                    println!("   Log in with: cli login {}", email);
                }
                RegisterOutcome::AlreadyRegistered { message }
                | RegisterOutcome::Rejected { message }
                | RegisterOutcome::ServerError { message } => fail(message),
            }
        }

        Commands::Login { email } => {
            let mut flow = AuthFlow::new(state.auth.clone());
            match flow.begin_login(&api, &email).await {
                Ok(SendOtpOutcome::Sent { message }) => {
                    println!("✅ {}", message);
                    println!("   Finish with: cli verify <code>");
                    state.auth = flow.into_stage();
                    state.save(&state_file)?;
                }
                Ok(SendOtpOutcome::UnknownEmail { message })
                | Ok(SendOtpOutcome::ServerError { message }) => fail(message),
                Err(e) => fail(e),
            }
        }

        Commands::Verify { code } => {
            let mut flow = AuthFlow::new(state.auth.clone());
            match flow.submit_code(&api, &code).await {
                Ok(VerifyOtpOutcome::Verified { user, .. }) => {
                    println!("✅ Logged in as {} <{}>", user.name, user.email);
                    state.auth = flow.into_stage();
                    state.save(&state_file)?;
                }
                Ok(VerifyOtpOutcome::NoCode { message })
                | Ok(VerifyOtpOutcome::WrongCode { message })
                | Ok(VerifyOtpOutcome::UnknownUser { message })
                | Ok(VerifyOtpOutcome::ServerError { message }) => fail(message),
                Err(e) => fail(e),
            }
        }

        Commands::Whoami => match &state.auth {
            AuthStage::Authenticated { session } => {
                println!("{} <{}>", session.user.name, session.user.email);
            }
            AuthStage::AwaitingCode { email } => {
                println!("Not logged in (code requested for {})", email);
            }
            AuthStage::Idle => println!("Not logged in"),
        },

        Commands::Logout => {
            state.clear_session();
            state.save(&state_file)?;
            println!("✅ Logged out");
        }

        Commands::Menu {
            veg,
            non_veg,
            search,
        } => {
            let is_veg = if veg {
                Some(true)
            } else if non_veg {
                Some(false)
            } else {
                None
            };

            match api.fetch_menu(is_veg, search.as_deref()).await? {
                MenuOutcome::Items(items) => {
                    if items.is_empty() {
                        println!("No matching items.");
                    } else {
                        println!("{:<5} {:<20} {:<8} {:<14} {}", "ID", "Name", "Price", "Category", "Veg");
                        println!("{}", "-".repeat(60));
                        for item in items {
                            println!(
                                "{:<5} {:<20} ₹{:<7} {:<14} {}",
                                item.id,
                                item.name,
                                item.price,
                                item.category,
                                if item.is_veg { "Yes" } else { "No" }
                            );
                        }
                    }
                }
                MenuOutcome::ServerError { message } => fail(message),
            }
        }

        Commands::Cart { command } => match command {
            CartCommands::Add { item_id, quantity } => {
                let items = match api.fetch_menu(None, None).await? {
                    MenuOutcome::Items(items) => items,
                    MenuOutcome::ServerError { message } => fail(message),
                };

                match items.into_iter().find(|i| i.id == item_id) {
                    Some(item) => {
                        let name = item.name.clone();
                        state.cart.add(item, quantity);
                        state.save(&state_file)?;
                        println!("✅ Added {} × {}", quantity, name);
                    }
                    None => fail(format!("No menu item with id {}", item_id)),
                }
            }

            CartCommands::Remove { item_id } => {
                if state.cart.remove(item_id) {
                    state.save(&state_file)?;
                    println!("✅ Removed item {}", item_id);
                } else {
                    fail(format!("Item {} is not in the cart", item_id));
                }
            }

            CartCommands::Show => {
                if state.cart.is_empty() {
                    println!("Cart is empty.");
                } else {
                    for line in state.cart.lines() {
                        println!(
                            "{:<20} × {:<3} ₹{}",
                            line.item.name,
                            line.quantity,
                            line.item.price * i64::from(line.quantity)
                        );
                    }
                    println!("{}", "-".repeat(32));
                    println!("Total: ₹{}", state.cart.total());
                }
            }

            CartCommands::Clear => {
                state.cart.clear();
                state.save(&state_file)?;
                println!("✅ Cart cleared");
            }
        },

        Commands::Checkout { card, expiry, cvv } => {
            let session = match state.session() {
                Some(session) => session.clone(),
                None => fail("Log in before checking out"),
            };

            if state.cart.is_empty() {
                fail("Cart is empty");
            }

            let cvv = match cvv {
                Some(cvv) => cvv,
                None => get_secret("CVV")?,
            };

            let details = CardDetails {
                number: card,
                expiry,
                cvv,
            };
            if let Err(e) = details.validate() {
                fail(e);
            }

            let amount = state.cart.total();
            let items = state.cart.order_items();

            match api.process_payment(&session.token, amount, &items).await? {
                PaymentOutcome::Paid { order_id, message } => {
                    state.cart.clear();
                    state.save(&state_file)?;
                    println!("✅ {}", message);
                    println!("   Order id: {}", order_id);
                }
                PaymentOutcome::Unauthorized { message } => fail(message),
                PaymentOutcome::ServerError { message } => fail(message),
            }
        }
    }

    Ok(())
}
