// UI layer: interactive screens built on `dialoguer`.
// Each screen runs its own select loop and hands a `Transition` back to
// `run`, which moves between screens until the user exits.

use crate::api::ApiClient;
use crate::catalog::{CatalogStore, Listing, ListingForm, ListingId};
use crate::contact;
use crate::router::{Role, Screen, Transition};
use anyhow::Result;
use crossterm::style::Stylize;
use dialoguer::{Confirm, Input, Password, Select};
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;
use tracing::warn;

// Network failures are never broken down for the user; details go to the log.
const LOGIN_FAILED: &str = "Login failed, please try again.";
const REGISTER_FAILED: &str = "Registration failed, please try again.";
const PROFILE_FAILED: &str = "Could not load your profile.";

/// Run the app until the user chooses "Exit".
///
/// Note: `Select::interact()` is keyboard-driven: you can use arrow keys
/// and Enter to choose an option.
pub fn run(mut api: ApiClient) -> Result<()> {
    let mut screen = Screen::default();
    loop {
        let transition = match screen {
            Screen::Login => login_screen(&mut api)?,
            Screen::Register => register_screen(&api)?,
            Screen::Main => main_screen(&mut api)?,
        };
        match transition {
            Some(t) => screen = screen.next(t),
            None => break,
        }
    }
    Ok(())
}

fn login_screen(api: &mut ApiClient) -> Result<Option<Transition>> {
    print_header("Login");
    loop {
        let items = ["Login", "Register", "Exit"];
        let selection = Select::new().items(&items).default(0).interact()?;
        match selection {
            0 => {
                if handle_login(api)? {
                    return Ok(Some(Transition::LoggedIn));
                }
            }
            1 => return Ok(Some(Transition::ShowRegister)),
            _ => return Ok(None),
        }
    }
}

/// Collect credentials and log in. Returns whether a session was started.
fn handle_login(api: &mut ApiClient) -> Result<bool> {
    let email: String = Input::new().with_prompt("Email").interact_text()?;
    let password: String = Password::new().with_prompt("Password").interact()?;

    let spinner = spinner("Logging in...")?;
    let outcome = api.login(&email, &password);
    spinner.finish_and_clear();

    match outcome {
        Ok(resp) => {
            println!("{}", resp.message.as_deref().unwrap_or("Welcome!"));
            Ok(true)
        }
        Err(e) => {
            warn!(error = %e, "login failed");
            println!("{}", LOGIN_FAILED);
            Ok(false)
        }
    }
}

fn register_screen(api: &ApiClient) -> Result<Option<Transition>> {
    print_header("Register");
    loop {
        let items = ["Register", "Back to login"];
        let selection = Select::new().items(&items).default(0).interact()?;
        match selection {
            0 => {
                if handle_register(api)? {
                    return Ok(Some(Transition::Registered));
                }
            }
            _ => return Ok(Some(Transition::ShowLogin)),
        }
    }
}

/// Collect registration fields and call `ApiClient::register`.
fn handle_register(api: &ApiClient) -> Result<bool> {
    let name: String = Input::new().with_prompt("Full name").interact_text()?;
    let email: String = Input::new().with_prompt("Email").interact_text()?;
    let password: String = Password::new().with_prompt("Password").interact()?;
    let confirmation: String = Password::new()
        .with_prompt("Confirm password")
        .interact()?;

    let spinner = spinner("Registering...")?;
    let outcome = api.register(&name, &email, &password, &confirmation);
    spinner.finish_and_clear();

    match outcome {
        Ok(resp) => {
            let message = resp
                .message
                .unwrap_or_else(|| "Registered successfully, please login.".into());
            println!("{}", message);
            Ok(true)
        }
        Err(e) => {
            warn!(error = %e, "register failed");
            println!("{}", REGISTER_FAILED);
            Ok(false)
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Action {
    Add,
    Update,
    Delete,
    Chat,
    ToggleRole,
    Profile,
    Logout,
    Exit,
}

impl Action {
    fn for_role(role: Role) -> &'static [Action] {
        match role {
            Role::Seller => &[
                Action::Add,
                Action::Update,
                Action::Delete,
                Action::ToggleRole,
                Action::Profile,
                Action::Logout,
                Action::Exit,
            ],
            Role::Buyer => &[
                Action::Chat,
                Action::ToggleRole,
                Action::Profile,
                Action::Logout,
                Action::Exit,
            ],
        }
    }

    fn label(self, role: Role) -> &'static str {
        match self {
            Action::Add => "Add listing",
            Action::Update => "Update listing",
            Action::Delete => "Delete listing",
            Action::Chat => "Chat with seller",
            Action::ToggleRole => role.toggle_label(),
            Action::Profile => "My profile",
            Action::Logout => "Logout",
            Action::Exit => "Exit",
        }
    }
}

/// The marketplace screen. The catalog lives only as long as this screen.
fn main_screen(api: &mut ApiClient) -> Result<Option<Transition>> {
    let mut store = CatalogStore::new();
    let mut form = ListingForm::default();
    let mut role = Role::default();

    loop {
        print_header(match role {
            Role::Seller => "Seller",
            Role::Buyer => "Buyer",
        });
        print_catalog(&store);

        let actions = Action::for_role(role);
        let items: Vec<&str> = actions.iter().map(|a| a.label(role)).collect();
        let selection = Select::new().items(&items).default(0).interact()?;

        match actions[selection] {
            Action::Add => handle_add(&mut store, &mut form)?,
            Action::Update => handle_update(&mut store)?,
            Action::Delete => handle_delete(&mut store)?,
            Action::Chat => handle_chat(&store)?,
            Action::ToggleRole => role = role.toggle(),
            Action::Profile => handle_profile(api)?,
            Action::Logout => {
                api.logout();
                return Ok(Some(Transition::LoggedOut));
            }
            Action::Exit => return Ok(None),
        }
    }
}

/// Fill the seller form and submit it. A rejected form keeps its values so
/// the next attempt starts from them.
fn handle_add(store: &mut CatalogStore, form: &mut ListingForm) -> Result<()> {
    *form = prompt_form(form)?;
    match store.submit(form) {
        Ok(listing) => println!("Added {} (#{})", listing.name, listing.id),
        Err(e) => println!("Listing not added: {}", e),
    }
    Ok(())
}

/// Edit form pre-filled with the current values; accepting it unchanged
/// leaves the listing as it was.
fn handle_update(store: &mut CatalogStore) -> Result<()> {
    let Some(id) = pick_listing(store, "Listing to update")? else {
        return Ok(());
    };
    let Some(current) = store.get(id) else {
        return Ok(());
    };
    let edited = prompt_form(&ListingForm::from_listing(current))?;
    match store.edit(id, &edited) {
        Ok(Some(listing)) => println!("Updated {}", listing.name),
        Ok(None) => println!("Listing #{} no longer exists", id),
        Err(e) => println!("Listing not updated: {}", e),
    }
    Ok(())
}

fn handle_delete(store: &mut CatalogStore) -> Result<()> {
    let Some(id) = pick_listing(store, "Listing to delete")? else {
        return Ok(());
    };
    let confirmed = Confirm::new()
        .with_prompt(format!("Delete listing #{}?", id))
        .default(false)
        .interact()?;
    if confirmed {
        if let Some(listing) = store.remove(id) {
            println!("Deleted {}", listing.name);
        }
    }
    Ok(())
}

fn handle_chat(store: &CatalogStore) -> Result<()> {
    let Some(id) = pick_listing(store, "Chat about")? else {
        return Ok(());
    };
    let Some(listing) = store.get(id) else {
        return Ok(());
    };
    match contact::listing_link(listing) {
        Ok(url) => {
            println!("Open this link to chat with the seller:");
            println!("{}", url.as_str().green());
        }
        Err(e) => println!("Cannot contact seller: {}", e),
    }
    Ok(())
}

fn handle_profile(api: &ApiClient) -> Result<()> {
    let spinner = spinner("Loading profile...")?;
    let outcome = api.current_user();
    spinner.finish_and_clear();

    match outcome {
        Ok(user) => println!("{} <{}>", user.name, user.email),
        Err(e) => {
            warn!(error = %e, "fetching profile failed");
            println!("{}", PROFILE_FAILED);
        }
    }
    Ok(())
}

/// Prompt for the four listing fields, starting from `initial`.
/// Empty answers are allowed here; the store decides what is valid.
fn prompt_form(initial: &ListingForm) -> Result<ListingForm> {
    let ask = |prompt: &str, value: &str| -> Result<String> {
        let answer: String = Input::new()
            .with_prompt(prompt)
            .with_initial_text(value)
            .allow_empty(true)
            .interact_text()?;
        Ok(answer)
    };
    Ok(ListingForm {
        name: ask("Item name", &initial.name)?,
        price: ask("Price (Rp)", &initial.price)?,
        description: ask("Description", &initial.description)?,
        seller_contact: ask("WhatsApp number", &initial.seller_contact)?,
    })
}

/// Let the user choose a listing. `None` when the catalog is empty or the
/// user backs out with Esc.
fn pick_listing(store: &CatalogStore, prompt: &str) -> Result<Option<ListingId>> {
    if store.is_empty() {
        println!("No listings yet.");
        return Ok(None);
    }
    let rows: Vec<String> = store.listings().iter().map(listing_row).collect();
    let selection = Select::new()
        .with_prompt(prompt)
        .items(&rows)
        .default(0)
        .interact_opt()?;
    Ok(selection.map(|i| store.listings()[i].id))
}

fn listing_row(listing: &Listing) -> String {
    format!("#{} {} - Rp {}", listing.id, listing.name, listing.price)
}

fn print_header(title: &str) {
    println!();
    println!("{} {}", "UB Mager".bold().blue(), format!("[{}]", title).dim());
}

fn print_catalog(store: &CatalogStore) {
    if store.is_empty() {
        println!("{}", "No listings yet.".dim());
        return;
    }
    for listing in store.listings() {
        println!("{}", listing.name.as_str().bold());
        println!("  {}", format!("Rp {}", listing.price).green());
        println!("  {}", listing.description.as_str().grey());
    }
}

/// `indicatif` spinner shown while a request is in flight.
fn spinner(message: &'static str) -> Result<ProgressBar> {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::with_template("{spinner} {msg}")?);
    spinner.set_message(message);
    spinner.enable_steady_tick(Duration::from_millis(100));
    Ok(spinner)
}
