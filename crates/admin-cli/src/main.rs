//! Vitrine admin CLI
//!
//! Operational companion to the web server:
//! - FAQ export/import as JSON (upsert keyed on question text)
//! - Company figures initialization
//! - Service catalog seeding
//! - Staff token generation

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use vitrine_common::{
    auth::{generate_secret, JwtManager},
    config::AppConfig,
    db::models::ServiceKind,
    db::{DbPool, NewService, Repository},
};

#[derive(Parser)]
#[command(name = "vitrine-admin", version, about = "Vitrine site administration")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// FAQ backup and restore
    Faq {
        #[command(subcommand)]
        action: FaqAction,
    },

    /// Create the company figures row if none is active
    InitCompanyStats {
        /// Completed projects
        #[arg(long, default_value_t = 50)]
        projects: i32,

        /// Years of experience
        #[arg(long, default_value_t = 5)]
        years: i32,

        /// Client satisfaction percentage
        #[arg(long, default_value_t = 98)]
        satisfaction: i32,
    },

    /// Create the eight catalog services with placeholder copy
    SeedServices,

    /// Generate a staff token for the statistics dashboard
    StaffToken {
        /// Token subject (staff account identifier)
        #[arg(long, default_value = "admin")]
        subject: String,

        /// Token lifetime in seconds (defaults to the configured expiration)
        #[arg(long)]
        ttl_secs: Option<i64>,
    },

    /// Print a freshly generated JWT signing secret (auth.jwt_secret)
    GenerateSecret,
}

#[derive(Subcommand)]
enum FaqAction {
    /// Write all FAQ entries to a JSON file
    Export {
        #[arg(long, default_value = "faqs_backup.json")]
        file: PathBuf,
    },

    /// Load FAQ entries from a JSON file, matching on question text
    Import {
        #[arg(long, default_value = "faqs_backup.json")]
        file: PathBuf,
    },
}

/// On-disk FAQ record
#[derive(Debug, Serialize, Deserialize)]
struct FaqRecord {
    question: String,
    answer: String,
    #[serde(rename = "order", default)]
    sort_order: i32,
    #[serde(default = "default_active")]
    active: bool,
}

fn default_active() -> bool {
    true
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();
    let config = AppConfig::load().context("Failed to load configuration")?;

    match cli.command {
        Command::Faq { action } => {
            let repo = connect(&config).await?;
            match action {
                FaqAction::Export { file } => export_faqs(&repo, &file).await,
                FaqAction::Import { file } => import_faqs(&repo, &file).await,
            }
        }
        Command::InitCompanyStats {
            projects,
            years,
            satisfaction,
        } => {
            let repo = connect(&config).await?;
            init_company_stats(&repo, projects, years, satisfaction).await
        }
        Command::SeedServices => {
            let repo = connect(&config).await?;
            seed_services(&repo).await
        }
        Command::StaffToken { subject, ttl_secs } => staff_token(&config, &subject, ttl_secs),
        Command::GenerateSecret => {
            println!("{}", generate_secret());
            Ok(())
        }
    }
}

async fn connect(config: &AppConfig) -> anyhow::Result<Repository> {
    let pool = DbPool::new(&config.database)
        .await
        .context("Failed to connect to the database")?;
    Ok(Repository::new(pool))
}

async fn export_faqs(repo: &Repository, file: &PathBuf) -> anyhow::Result<()> {
    let faqs = repo.list_faqs().await?;

    let records: Vec<FaqRecord> = faqs
        .into_iter()
        .map(|faq| FaqRecord {
            question: faq.question,
            answer: faq.answer,
            sort_order: faq.sort_order,
            active: faq.active,
        })
        .collect();

    let json = serde_json::to_string_pretty(&records)?;
    std::fs::write(file, json)
        .with_context(|| format!("Failed to write {}", file.display()))?;

    println!("[OK] {} FAQ(s) exportée(s) vers {}", records.len(), file.display());
    Ok(())
}

async fn import_faqs(repo: &Repository, file: &PathBuf) -> anyhow::Result<()> {
    let json = std::fs::read_to_string(file)
        .with_context(|| format!("Fichier {} introuvable", file.display()))?;
    let records: Vec<FaqRecord> =
        serde_json::from_str(&json).context("Invalid FAQ backup file")?;

    let mut imported = 0;
    let mut updated = 0;

    for record in records {
        let (faq, created) = repo
            .upsert_faq(
                &record.question,
                &record.answer,
                record.sort_order,
                record.active,
            )
            .await?;

        if created {
            imported += 1;
            println!("[OK] FAQ créée: {}", faq.question);
        } else {
            updated += 1;
            println!("[UPDATE] FAQ mise à jour: {}", faq.question);
        }
    }

    println!("\n[SUCCESS] Terminé ! {} créée(s), {} mise(s) à jour.", imported, updated);
    Ok(())
}

async fn init_company_stats(
    repo: &Repository,
    projects: i32,
    years: i32,
    satisfaction: i32,
) -> anyhow::Result<()> {
    if !(0..=100).contains(&satisfaction) {
        bail!("La satisfaction doit être entre 0 et 100");
    }

    if let Some(existing) = repo.active_company_stats().await? {
        println!(
            "[UPDATE] Statistiques existent déjà: {} projets, {} ans, {}%",
            existing.projects_count, existing.years_experience, existing.client_satisfaction
        );
        return Ok(());
    }

    let stats = repo
        .create_company_stats(projects, years, satisfaction, true)
        .await?;

    println!(
        "[OK] Statistiques créées: {} projets, {} ans, {}%",
        stats.projects_count, stats.years_experience, stats.client_satisfaction
    );
    Ok(())
}

async fn seed_services(repo: &Repository) -> anyhow::Result<()> {
    let mut created = 0;
    let mut skipped = 0;

    for (index, kind) in ServiceKind::all().into_iter().enumerate() {
        if repo.find_service_by_kind(kind).await?.is_some() {
            skipped += 1;
            continue;
        }

        let service = repo
            .create_service(NewService {
                kind,
                short_description: format!("{} pour votre entreprise.", kind.label()),
                full_description: format!(
                    "Notre offre {} est à compléter depuis l'administration.",
                    kind.label()
                ),
                icon: None,
                meta_title: None,
                meta_description: None,
                sort_order: index as i32,
                active: true,
            })
            .await?;

        println!("[OK] Service créé: {} ({})", kind.label(), service.slug);
        created += 1;
    }

    println!("\n[SUCCESS] {} créé(s), {} déjà présent(s).", created, skipped);
    Ok(())
}

fn staff_token(config: &AppConfig, subject: &str, ttl_secs: Option<i64>) -> anyhow::Result<()> {
    let Some(secret) = config.auth.jwt_secret.as_deref() else {
        bail!("Aucun secret JWT configuré (auth.jwt_secret)");
    };

    let manager = JwtManager::new(secret, config.auth.jwt_expiration_secs);
    let token = match ttl_secs {
        Some(ttl) => manager.generate_token(subject, ttl)?,
        None => manager.generate_staff_token(subject)?,
    };

    println!("{}", token);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_faq_record_field_names() {
        let json = r#"{"question":"Quels sont vos délais ?","answer":"Deux semaines.","order":3,"active":false}"#;
        let record: FaqRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.sort_order, 3);
        assert!(!record.active);
    }

    #[test]
    fn test_faq_record_defaults() {
        let json = r#"{"question":"Q","answer":"R"}"#;
        let record: FaqRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.sort_order, 0);
        assert!(record.active);
    }

    #[test]
    fn test_cli_parses_subcommands() {
        let cli = Cli::try_parse_from(["vitrine-admin", "faq", "export", "--file", "out.json"]);
        assert!(cli.is_ok());

        let cli = Cli::try_parse_from(["vitrine-admin", "init-company-stats", "--projects", "10"]);
        assert!(cli.is_ok());

        let cli = Cli::try_parse_from(["vitrine-admin", "staff-token", "--subject", "ops"]);
        assert!(cli.is_ok());

        let cli = Cli::try_parse_from(["vitrine-admin", "generate-secret"]);
        assert!(cli.is_ok());
    }

    #[test]
    fn test_generated_secret_is_usable() {
        let secret = generate_secret();
        assert_eq!(secret.len(), 64);
        assert!(secret.chars().all(|c| c.is_ascii_hexdigit()));
    }
}
