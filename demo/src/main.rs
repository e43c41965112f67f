// Demo flow - walks one account through the full trust lifecycle:
// invitation, registration, verification, scoring, moderation, audit.

use account_core::{AccountStore, ProfileKind, VerificationTier};
use chrono::{Datelike, Duration, NaiveDate, Utc};
use invitation_ledger::{InvitationLedger, QuotaConfig, Registrar};
use moderation_service::{ModerationAction, ModerationEngine, ReportCategory, ReportQueue, Severity};
use std::sync::Arc;
use trust_engine::{ScoreWeights, TrustScorer};
use verification_engine::{
    Decision, IdentityParty, IdentityPayload, SimulatedOracle, VerificationWorkflow,
};

fn dob_years_ago(years: i32) -> NaiveDate {
    let today = Utc::now().date_naive();
    NaiveDate::from_ymd_opt(today.year() - years, today.month(), today.day())
        .unwrap_or_else(|| NaiveDate::from_ymd_opt(today.year() - years, 2, 28).unwrap())
}

fn party(name: &str, years: i32) -> IdentityParty {
    IdentityParty {
        full_name: name.to_string(),
        date_of_birth: dob_years_ago(years),
        id_document_ref: format!("doc://id/{}", name.to_lowercase().replace(' ', "-")),
        id_number: format!("X-{}", years * 111_111),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    tracing::info!("Starting Velvet trust engine demo");

    let accounts = Arc::new(AccountStore::new(TrustScorer::new(ScoreWeights::default())));
    let ledger = Arc::new(InvitationLedger::new(
        accounts.clone(),
        QuotaConfig::from_env()?,
    ));
    let registrar = Registrar::new(ledger.clone(), accounts.clone());
    let workflow = VerificationWorkflow::new(accounts.clone());
    let queue = Arc::new(ReportQueue::new(accounts.clone()));
    let moderation = ModerationEngine::new(queue.clone(), accounts.clone());

    println!("\n=== 1. Invitations ===");
    let club = accounts.create_seeded(
        account_core::AccountId::generate(),
        "Club Nocturne",
        ProfileKind::Establishment,
        Utc::now(),
    );
    let invite = ledger.mint_for_issuer(
        &club.id,
        ProfileKind::Individual,
        Utc::now() + Duration::days(30),
    )?;
    println!(
        "Establishment {} minted code {} ({} of its quota used)",
        club.display_name,
        invite.code,
        ledger.list_for_issuer(&club.id).len()
    );

    println!("\n=== 2. Registration ===");
    let member = registrar.register(&invite.code, ProfileKind::Individual, "Luna")?;
    println!(
        "Registered {} ({:?}, tier {}, score {})",
        member.display_name, member.status, member.tier, member.trust_score
    );

    println!("\n=== 3. Verification ===");
    let underage = IdentityPayload {
        parties: vec![party("Luna M", 17)],
    };
    match workflow.submit(&member.id, underage) {
        Err(e) => println!("Underage submission rejected: {}", e),
        Ok(_) => unreachable!("the age gate must reject this"),
    }

    let request = workflow.submit(
        &member.id,
        IdentityPayload {
            parties: vec![party("Luna Martinez", 26)],
        },
    )?;
    workflow.run_oracle(&request.id, &SimulatedOracle).await?;
    let assessed = workflow.get(&request.id)?;
    if let Some(report) = &assessed.risk_report {
        println!(
            "Oracle says {} (confidence {}%), operator decides anyway",
            report.risk_level, report.confidence
        );
    }

    workflow.decide(&request.id, Decision::Approve(VerificationTier::Identity))?;
    let verified = accounts.get(&member.id)?;
    println!(
        "Approved to {} -> legacy label {}, score {}",
        verified.tier,
        verified.legacy_level().as_str(),
        verified.trust_score
    );

    println!("\n=== 4. Moderation ===");
    let report = queue.file(
        &club.id,
        &member.id,
        ReportCategory::Scam,
        Severity::Critical,
        "Payment links in profile gallery",
        vec!["evidence://screenshot/1".to_string()],
    )?;
    println!(
        "Report filed at severity {:?} (queue depth {})",
        report.severity,
        queue.pending().len()
    );

    moderation.resolve(
        &report.id,
        ModerationAction::Suspend,
        "mod-01",
        Some("Confirmed external payment solicitation".to_string()),
    )?;
    let suspended = accounts.get(&member.id)?;
    println!(
        "Resolved as Suspend: status {:?}, score {} (access {:?})",
        suspended.status,
        suspended.trust_score,
        suspended.access_level()
    );

    println!("\n=== 5. Audit trail ===");
    for record in moderation.audit().records() {
        println!(
            "#{} {} by {} on {} ({})",
            record.seq,
            record.action.as_str(),
            record.moderator,
            record.subject,
            &record.hash[..12]
        );
    }
    println!("Chain verified: {}", moderation.audit().verify());

    tracing::info!("Demo complete");
    Ok(())
}
