use std::{collections::HashMap, error::Error, path::Path, process::exit};

use clap::Parser;
use rusqlite::Connection;
use time::{Date, Duration, OffsetDateTime};

use finance_manager::{
    Amount, AutomatedPayment, Category, Frequency, Loan, LoanType, Transaction, TransactionType,
    initialize_db, insert_automated_payment, insert_loan, insert_transaction, save_budget,
    save_savings_goal,
};

/// A utility for creating a database filled with demo data for finance_manager.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to save the SQLite database to.
    #[arg(long, short)]
    output_path: String,

    /// The user the demo data belongs to.
    #[arg(long, default_value = "default_user")]
    user: String,
}

/// The monthly expenses recorded in each demo month.
const MONTHLY_EXPENSES: [(Category, f64, &str); 7] = [
    (Category::HousingRent, 1450.0, "Rent"),
    (Category::FoodAndGroceries, 312.4, "Groceries"),
    (Category::Transportation, 86.0, "Fuel"),
    (Category::Utilities, 154.75, "Power and internet"),
    (Category::Entertainment, 48.5, "Cinema"),
    (Category::Shopping, 120.0, "Clothes"),
    (Category::Healthcare, 35.0, "Pharmacy"),
];

/// Create and populate a database for manual testing.
fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let output_path = Path::new(&args.output_path);

    if output_path.extension().is_none_or(|extension| extension.is_empty()) {
        eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
        exit(1);
    }

    if output_path.is_file() {
        eprintln!("File already exists at {output_path:#?}!");
        exit(1);
    }

    println!("Creating database at {output_path:#?}");
    let conn = Connection::open(output_path)?;

    initialize_db(&conn)?;

    let today = OffsetDateTime::now_utc().date();

    println!("Creating transactions...");
    let transactions = demo_transactions(today, &args.user)?;
    for transaction in &transactions {
        insert_transaction(transaction, &conn)?;
    }

    println!("Creating budget...");
    let budget = HashMap::from([
        (Category::HousingRent, 1500.0),
        (Category::FoodAndGroceries, 300.0),
        (Category::Transportation, 100.0),
        (Category::Utilities, 160.0),
        (Category::Entertainment, 40.0),
        (Category::Shopping, 150.0),
        (Category::Healthcare, 50.0),
        (Category::Other, 50.0),
    ]);
    save_budget(&budget, &conn)?;
    save_savings_goal(&args.user, 5000.0, &conn)?;

    println!("Creating automated payments and loans...");
    for (name, amount, frequency) in [
        ("Streaming", 18.99, Frequency::Monthly),
        ("Gym", 12.5, Frequency::Weekly),
        ("Car insurance", 640.0, Frequency::Yearly),
    ] {
        insert_automated_payment(
            &AutomatedPayment {
                name: name.to_owned(),
                amount: Amount::new(amount)?,
                frequency,
                next_payment_date: today + Duration::days(14),
                user: args.user.clone(),
            },
            &conn,
        )?;
    }

    let loans = [
        ("Sam", 200.0, LoanType::Given),
        ("Credit union", 2500.0, LoanType::Taken),
    ];
    for (name, amount, loan_type) in loans {
        let loan = Loan {
            name: name.to_owned(),
            amount: Amount::new(amount)?,
            loan_type,
            due_date: today + Duration::days(90),
            user: args.user.clone(),
        };

        insert_loan(&loan, &conn)?;

        if let Some(expense) = loan.as_expense(today) {
            insert_transaction(&expense, &conn)?;
        }
    }

    println!("Success!");

    Ok(())
}

/// Three months of salary and expenses, ending in the current month.
fn demo_transactions(today: Date, user: &str) -> Result<Vec<Transaction>, Box<dyn Error>> {
    let mut transactions = Vec::new();

    for months_ago in (0..3u8).rev() {
        let month_start = first_of_month_before(today, months_ago)?;

        transactions.push(Transaction {
            date: month_start,
            category: Category::Salary,
            amount: Amount::new(4200.0)?,
            description: "Salary".to_owned(),
            transaction_type: TransactionType::Income,
            user: user.to_owned(),
        });

        for (day, (category, amount, description)) in MONTHLY_EXPENSES.iter().enumerate() {
            let date = month_start + Duration::days(day as i64 * 3);
            if date > today {
                break;
            }

            // Spending creeps up each month so the latest month overspends.
            let amount = amount * (1.0 + 0.1 * (2 - months_ago) as f64);

            transactions.push(Transaction {
                date,
                category: *category,
                amount: Amount::new(amount)?,
                description: (*description).to_owned(),
                transaction_type: TransactionType::Expense,
                user: user.to_owned(),
            });
        }
    }

    Ok(transactions)
}

/// The first day of the month `months_ago` months before the month of `date`.
fn first_of_month_before(date: Date, months_ago: u8) -> Result<Date, Box<dyn Error>> {
    let mut month = date.month();
    let mut year = date.year();

    for _ in 0..months_ago {
        month = month.previous();
        if month == time::Month::December {
            year -= 1;
        }
    }

    Ok(Date::from_calendar_date(year, month, 1)?)
}
