use crate::infra::{
    default_engine_config, seed_demo_roster, InMemoryLenderDirectory, InMemoryMatchRepository,
    DEMO_COMMUNITY,
};
use clap::Args;
use std::sync::Arc;

use lendlocal::config::AppConfig;
use lendlocal::error::AppError;
use lendlocal::workflows::lending::outlook::{borrower_outlook, lender_outlook};
use lendlocal::workflows::lending::{
    BorrowerId, CommunityId, FundingRequest, LoanMatchingService, MatchRepository, Recommendation,
    RosterFilter,
};

#[derive(Args, Debug)]
pub(crate) struct QuoteArgs {
    /// Requested amount in dollars
    #[arg(long)]
    pub(crate) amount: f64,
    /// Borrower capacity ceiling (defaults to the configured platform default)
    #[arg(long)]
    pub(crate) ceiling: Option<f64>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Requested amount for the demo borrower (defaults to 1500)
    #[arg(long)]
    pub(crate) amount: Option<f64>,
    /// Borrower capacity ceiling (defaults to the configured platform default)
    #[arg(long)]
    pub(crate) ceiling: Option<f64>,
}

fn demo_service() -> (
    LoanMatchingService<InMemoryLenderDirectory, InMemoryMatchRepository>,
    Arc<InMemoryLenderDirectory>,
    Arc<InMemoryMatchRepository>,
) {
    let directory = Arc::new(InMemoryLenderDirectory::default());
    let matches = Arc::new(InMemoryMatchRepository::default());
    let service = LoanMatchingService::new(
        directory.clone(),
        matches.clone(),
        default_engine_config(),
    );
    (service, directory, matches)
}

pub(crate) fn run_quote(args: QuoteArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let ceiling = args
        .ceiling
        .unwrap_or(config.lending.default_capacity_ceiling);

    let (service, _, _) = demo_service();
    let assessment = service.quote_risk(args.amount, ceiling);

    println!(
        "Risk score {} ({} risk) -> recommendation: {}",
        assessment.score,
        assessment.label.label(),
        assessment.recommendation.label()
    );
    println!("{}", assessment.explanation);
    if assessment.recommendation == Recommendation::No {
        println!("{}", service.decline_guidance(args.amount, ceiling));
    }

    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let amount = args.amount.unwrap_or(1500.0);
    let ceiling = args
        .ceiling
        .unwrap_or(config.lending.default_capacity_ceiling);

    println!("LendLocal matching demo");
    println!(
        "Borrower requests ${amount:.2} against a ${ceiling:.2} capacity ceiling in {DEMO_COMMUNITY}"
    );

    let (service, directory, matches) = demo_service();
    seed_demo_roster(&directory);

    let assessment = service.quote_risk(amount, ceiling);
    println!(
        "\nRisk read: score {} ({} risk), recommendation {}",
        assessment.score,
        assessment.label.label(),
        assessment.recommendation.label()
    );
    println!("  {}", assessment.explanation);

    let request = FundingRequest {
        borrower_id: BorrowerId("user_demo0001".to_string()),
        requested_amount: amount,
        capacity_ceiling: ceiling,
        filter: RosterFilter {
            community: Some(CommunityId(DEMO_COMMUNITY.to_string())),
            require_location_verified: true,
        },
    };

    let combos = match service.borrow_options(&request) {
        Ok(combos) => combos,
        Err(err) => {
            println!("\nNo funding options: {err}");
            return Ok(());
        }
    };

    println!("\nFunding options");
    for combo in &combos {
        println!("- {} (total ${:.2})", combo.id, combo.total);
        for part in &combo.parts {
            println!(
                "    {} contributes ${:.2} at {:.2}%",
                part.lender_id, part.amount, part.rate
            );
        }
    }

    let record = match service.commit_match(&request) {
        Ok(record) => record,
        Err(err) => {
            println!("\nMatch could not be committed: {err}");
            return Ok(());
        }
    };
    println!("\nCommitted {} at {}", record.id.0, record.created_at);
    match serde_json::to_string_pretty(&record.receipt()) {
        Ok(json) => println!("Receipt payload:\n{json}"),
        Err(err) => println!("Receipt payload unavailable: {err}"),
    }

    match matches.fetch(&record.id) {
        Ok(Some(stored)) => println!(
            "Repository holds {} for borrower {}",
            stored.id.0, stored.borrower_id.0
        ),
        Ok(None) => println!("Repository lookup returned no record"),
        Err(err) => println!("Repository unavailable: {err}"),
    }

    println!("\nDashboards");
    let borrower = borrower_outlook(amount, config.lending.bank_avg_rate);
    println!(
        "- Borrower: next payment ${:.2} in {} week(s), ${:.2} saved vs a bank this year",
        borrower.next_payment.amount, borrower.next_payment.due_in_weeks,
        borrower.savings_vs_bank_year
    );
    let lender = lender_outlook(config.lending.default_capacity_ceiling);
    println!(
        "- Lender: next payment ${:.2}, expected revenue ${:.2} this year",
        lender.next_payment.amount, lender.expected_revenue_year
    );

    Ok(())
}
