//! HealthPet CLI - Command-line interface for the clinic engine

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tabled::{Table, Tabled};

const DEFAULT_RPC_URL: &str = "http://127.0.0.1:9539";

#[derive(Parser)]
#[command(name = "healthpet")]
#[command(about = "HealthPet Clinic Engine CLI", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// RPC server URL
    #[arg(long, env = "HEALTHPET_RPC_URL", default_value = DEFAULT_RPC_URL)]
    rpc_url: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage animals
    #[command(subcommand)]
    Animal(AnimalCommands),

    /// Manage vaccinations
    #[command(subcommand)]
    Vaccine(VaccineCommands),

    /// Manage medical profiles
    #[command(subcommand)]
    Profile(ProfileCommands),
}

#[derive(Subcommand)]
enum AnimalCommands {
    /// Register a new animal
    Add {
        /// Animal name
        #[arg(long)]
        name: String,

        /// Species: dog, cat or other
        #[arg(long, default_value = "dog")]
        species: String,

        /// Age in years (fractions allowed, e.g. 0.5)
        #[arg(long)]
        age: f64,

        /// Owner name
        #[arg(long)]
        owner: String,

        /// Owner phone
        #[arg(long)]
        phone: String,

        /// Breed
        #[arg(long)]
        breed: Option<String>,

        /// Dog size class (small, medium, large)
        #[arg(long)]
        size: Option<String>,

        /// Cat coat length (short, medium, long)
        #[arg(long)]
        coat: Option<String>,

        /// Cat temperament
        #[arg(long)]
        temperament: Option<String>,
    },

    /// List all animals
    List,

    /// Show one animal
    Show {
        /// Animal ID
        animal_id: String,
    },

    /// Print the full record card (human age + care guidance)
    Card {
        /// Animal ID
        animal_id: String,
    },

    /// Remove an animal (cascades to its records)
    Remove {
        /// Animal ID
        animal_id: String,
    },
}

#[derive(Subcommand)]
enum VaccineCommands {
    /// Register an administered dose
    Add {
        /// Animal ID
        #[arg(long)]
        animal: String,

        /// Vaccine name (e.g. Rabies, V10)
        #[arg(long)]
        name: String,

        /// Application date (YYYY-MM-DD)
        #[arg(long)]
        applied: String,

        /// Scheduled next dose (YYYY-MM-DD)
        #[arg(long)]
        next_dose: Option<String>,

        /// Vaccine lot
        #[arg(long)]
        lot: Option<String>,

        /// Administering veterinarian
        #[arg(long)]
        vet: Option<String>,

        /// Free-text notes
        #[arg(long)]
        notes: Option<String>,
    },

    /// List vaccinations (all, or one animal's)
    List {
        /// Animal ID
        #[arg(long)]
        animal: Option<String>,
    },

    /// List overdue vaccinations
    Overdue,

    /// List vaccinations due within the window
    DueSoon {
        /// Window in days (server default: 7)
        #[arg(long)]
        window: Option<i64>,
    },

    /// Wider upcoming-doses report
    Upcoming {
        /// Window in days (server default: 30)
        #[arg(long)]
        window: Option<i64>,
    },

    /// List an animal's pending vaccinations
    Pending {
        /// Animal ID
        #[arg(long)]
        animal: String,
    },

    /// Per-animal vaccination statistics
    Stats {
        /// Animal ID
        #[arg(long)]
        animal: String,
    },

    /// Alert messages for an animal
    Alerts {
        /// Animal ID
        #[arg(long)]
        animal: String,
    },

    /// Mark a vaccination series complete
    Complete {
        /// Record ID
        record_id: String,
    },

    /// Remove a vaccination record
    Remove {
        /// Record ID
        record_id: String,
    },
}

#[derive(Subcommand)]
enum ProfileCommands {
    /// Show an animal's medical profile
    Show {
        /// Animal ID
        #[arg(long)]
        animal: String,
    },

    /// Create or update an animal's medical profile
    Set {
        /// Animal ID
        #[arg(long)]
        animal: String,

        /// Weight in kg
        #[arg(long)]
        weight: Option<f64>,

        /// Height in cm
        #[arg(long)]
        height: Option<f64>,

        /// Known allergies
        #[arg(long)]
        allergies: Option<String>,

        /// Current medications
        #[arg(long)]
        medications: Option<String>,

        /// Pre-existing conditions
        #[arg(long)]
        conditions: Option<String>,

        /// General notes
        #[arg(long)]
        notes: Option<String>,
    },
}

#[derive(Serialize)]
struct JsonRpcRequest {
    jsonrpc: String,
    method: String,
    params: serde_json::Value,
    id: u64,
}

#[derive(Deserialize)]
struct JsonRpcResponse {
    #[allow(dead_code)]
    jsonrpc: String,
    #[allow(dead_code)]
    id: u64,
    result: Option<serde_json::Value>,
    error: Option<JsonRpcError>,
}

#[derive(Deserialize)]
struct JsonRpcError {
    code: i32,
    message: String,
}

#[derive(Tabled)]
struct AnimalRow {
    id: String,
    name: String,
    species: String,
    age: String,
    owner: String,
    phone: String,
}

fn animal_row(v: &serde_json::Value) -> AnimalRow {
    AnimalRow {
        id: v["id"].as_str().unwrap_or("-").to_string(),
        name: v["name"].as_str().unwrap_or("-").to_string(),
        species: v["traits"]["kind"].as_str().unwrap_or("-").to_string(),
        age: v["age_years"]
            .as_f64()
            .map(|a| format!("{:.1}", a))
            .unwrap_or_else(|| "-".to_string()),
        owner: v["owner_name"].as_str().unwrap_or("-").to_string(),
        phone: v["owner_phone"].as_str().unwrap_or("-").to_string(),
    }
}

#[derive(Tabled)]
struct VaccineRow {
    id: String,
    vaccine: String,
    applied_on: String,
    next_dose: String,
    completed: String,
}

fn vaccine_row(v: &serde_json::Value) -> VaccineRow {
    VaccineRow {
        id: v["id"].as_str().unwrap_or("-").to_string(),
        vaccine: v["vaccine_name"].as_str().unwrap_or("-").to_string(),
        applied_on: v["applied_on"].as_str().unwrap_or("-").to_string(),
        next_dose: v["next_dose"].as_str().unwrap_or("-").to_string(),
        completed: if v["completed"].as_bool().unwrap_or(false) {
            "yes".to_string()
        } else {
            "no".to_string()
        },
    }
}

fn print_animals(values: &[serde_json::Value]) {
    if values.is_empty() {
        println!("{}", "No animals found".yellow());
        return;
    }
    let rows: Vec<AnimalRow> = values.iter().map(animal_row).collect();
    println!("{}", Table::new(rows));
}

fn print_vaccines(values: &[serde_json::Value]) {
    if values.is_empty() {
        println!("{}", "No vaccination records found".yellow());
        return;
    }
    let rows: Vec<VaccineRow> = values.iter().map(vaccine_row).collect();
    println!("{}", Table::new(rows));
}

async fn call_rpc(url: &str, method: &str, params: serde_json::Value) -> Result<serde_json::Value> {
    let request = JsonRpcRequest {
        jsonrpc: "2.0".to_string(),
        method: method.to_string(),
        params,
        id: 1,
    };

    let client = reqwest::Client::new();
    let response: JsonRpcResponse = client
        .post(url)
        .json(&request)
        .send()
        .await
        .context("Failed to connect to daemon")?
        .json()
        .await
        .context("Failed to parse response")?;

    if let Some(error) = response.error {
        anyhow::bail!("RPC error ({}): {}", error.code, error.message);
    }

    response
        .result
        .ok_or_else(|| anyhow::anyhow!("No result in response"))
}

fn as_array(value: serde_json::Value) -> Vec<serde_json::Value> {
    value.as_array().cloned().unwrap_or_default()
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let url = cli.rpc_url.clone();

    match cli.command {
        Commands::Animal(cmd) => run_animal(&url, cmd).await,
        Commands::Vaccine(cmd) => run_vaccine(&url, cmd).await,
        Commands::Profile(cmd) => run_profile(&url, cmd).await,
    }
}

async fn run_animal(url: &str, cmd: AnimalCommands) -> Result<()> {
    match cmd {
        AnimalCommands::Add {
            name,
            species,
            age,
            owner,
            phone,
            breed,
            size,
            coat,
            temperament,
        } => {
            let traits = match species.to_lowercase().as_str() {
                "dog" => json!({ "kind": "DOG", "size": size }),
                "cat" => json!({ "kind": "CAT", "coat": coat, "temperament": temperament }),
                _ => json!({ "kind": "OTHER" }),
            };
            let params = json!({
                "name": name,
                "breed": breed,
                "age_years": age,
                "owner_name": owner,
                "owner_phone": phone,
                "traits": traits,
            });

            let result = call_rpc(url, "animal.register.v1", params).await?;

            println!("{}", "✓ Animal registered".green().bold());
            println!();
            print_animals(&[result]);
        }

        AnimalCommands::List => {
            let result = call_rpc(url, "animal.list.v1", json!({})).await?;
            print_animals(&as_array(result));
        }

        AnimalCommands::Show { animal_id } => {
            let result = call_rpc(url, "animal.get.v1", json!({ "animal_id": animal_id })).await?;
            print_animals(&[result]);
        }

        AnimalCommands::Card { animal_id } => {
            let result = call_rpc(url, "animal.card.v1", json!({ "animal_id": animal_id })).await?;
            if let Some(card) = result.get("card").and_then(|v| v.as_str()) {
                println!("{}", card);
            }
        }

        AnimalCommands::Remove { animal_id } => {
            call_rpc(url, "animal.remove.v1", json!({ "animal_id": animal_id })).await?;
            println!(
                "{}",
                format!("✓ Animal {} removed", animal_id).green().bold()
            );
        }
    }

    Ok(())
}

async fn run_vaccine(url: &str, cmd: VaccineCommands) -> Result<()> {
    match cmd {
        VaccineCommands::Add {
            animal,
            name,
            applied,
            next_dose,
            lot,
            vet,
            notes,
        } => {
            let params = json!({
                "animal_id": animal,
                "vaccine_name": name,
                "applied_on": applied,
                "next_dose": next_dose,
                "lot": lot,
                "veterinarian": vet,
                "notes": notes,
            });

            let result = call_rpc(url, "vaccine.register.v1", params).await?;

            println!("{}", "✓ Vaccination registered".green().bold());
            println!();
            print_vaccines(&[result]);
        }

        VaccineCommands::List { animal } => {
            let result = match animal {
                Some(animal_id) => {
                    call_rpc(
                        url,
                        "vaccine.for_animal.v1",
                        json!({ "animal_id": animal_id }),
                    )
                    .await?
                }
                None => call_rpc(url, "vaccine.list.v1", json!({})).await?,
            };
            print_vaccines(&as_array(result));
        }

        VaccineCommands::Overdue => {
            let result = call_rpc(url, "vaccine.overdue.v1", json!({})).await?;
            let records = as_array(result);
            if !records.is_empty() {
                println!("{}", "Overdue vaccinations".red().bold());
            }
            print_vaccines(&records);
        }

        VaccineCommands::DueSoon { window } => {
            let result =
                call_rpc(url, "vaccine.due_soon.v1", json!({ "window_days": window })).await?;
            print_vaccines(&as_array(result));
        }

        VaccineCommands::Upcoming { window } => {
            let result =
                call_rpc(url, "vaccine.upcoming.v1", json!({ "window_days": window })).await?;
            print_vaccines(&as_array(result));
        }

        VaccineCommands::Pending { animal } => {
            let result = call_rpc(url, "vaccine.pending.v1", json!({ "animal_id": animal })).await?;
            print_vaccines(&as_array(result));
        }

        VaccineCommands::Stats { animal } => {
            let stats = call_rpc(url, "vaccine.stats.v1", json!({ "animal_id": animal })).await?;

            println!("{}", "Vaccination statistics".cyan().bold());
            println!();
            println!("  {} {}", "Total:".bold(), stats["total"]);
            println!("  {} {}", "Overdue:".bold(), stats["overdue"]);
            println!("  {} {}", "Due soon:".bold(), stats["due_soon"]);
            println!("  {} {}", "On track:".bold(), stats["on_track"]);
        }

        VaccineCommands::Alerts { animal } => {
            let result = call_rpc(url, "vaccine.alerts.v1", json!({ "animal_id": animal })).await?;
            let alerts = result
                .get("alerts")
                .and_then(|v| v.as_array())
                .cloned()
                .unwrap_or_default();

            if alerts.is_empty() {
                println!("{}", "No pending vaccinations".green());
            } else {
                for alert in alerts {
                    if let Some(text) = alert.as_str() {
                        println!("  {} {}", "•".bold(), text);
                    }
                }
            }
        }

        VaccineCommands::Complete { record_id } => {
            call_rpc(url, "vaccine.complete.v1", json!({ "record_id": record_id })).await?;
            println!(
                "{}",
                format!("✓ Vaccination {} marked complete", record_id)
                    .green()
                    .bold()
            );
        }

        VaccineCommands::Remove { record_id } => {
            call_rpc(url, "vaccine.remove.v1", json!({ "record_id": record_id })).await?;
            println!(
                "{}",
                format!("✓ Vaccination {} removed", record_id).green().bold()
            );
        }
    }

    Ok(())
}

async fn run_profile(url: &str, cmd: ProfileCommands) -> Result<()> {
    match cmd {
        ProfileCommands::Show { animal } => {
            let profile = call_rpc(url, "profile.get.v1", json!({ "animal_id": animal })).await?;

            println!("{}", "Medical profile".cyan().bold());
            println!();
            println!("  {} {}", "Weight (kg):".bold(), profile["weight_kg"]);
            println!("  {} {}", "Height (cm):".bold(), profile["height_cm"]);
            println!("  {} {}", "Allergies:".bold(), profile["allergies"]);
            println!("  {} {}", "Medications:".bold(), profile["medications"]);
            println!(
                "  {} {}",
                "Conditions:".bold(),
                profile["pre_existing_conditions"]
            );
            println!("  {} {}", "Notes:".bold(), profile["notes"]);
        }

        ProfileCommands::Set {
            animal,
            weight,
            height,
            allergies,
            medications,
            conditions,
            notes,
        } => {
            let params = json!({
                "animal_id": animal,
                "update": {
                    "weight_kg": weight,
                    "height_cm": height,
                    "allergies": allergies,
                    "medications": medications,
                    "pre_existing_conditions": conditions,
                    "notes": notes,
                }
            });

            call_rpc(url, "profile.upsert.v1", params).await?;
            println!("{}", "✓ Profile saved".green().bold());
        }
    }

    Ok(())
}
