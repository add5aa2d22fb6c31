//! Basic example demonstrating the Taleo API client.
//!
//! Run with:
//! ```
//! TALEO_API_URL=https://tbe.example.net/api/v1 TALEO_ORG_CODE=ORG \
//!     TALEO_USERNAME=user TALEO_PASSWORD=secret cargo run --example basic
//! ```

use taleo::{Candidate, Credentials, Employee, Entity, Fetch, Search, TaleoClient};

#[tokio::main]
async fn main() -> taleo::Result<()> {
    // Initialize tracing for debugging (optional)
    tracing_subscriber::fmt::init();

    // Create client from environment variables and log in
    println!("Creating Taleo client...");
    let client = TaleoClient::from_env()?;
    client.login(&Credentials::from_env()?).await?;
    println!("Connected to: {}", client.base_url());

    // Search the first page of employees
    println!("\n--- Searching Employees (first page) ---");
    let page = Employee::search_page(&client, 1, 10).await?;
    println!("Found {} employees (total: {})", page.len(), page.total);

    for resource in &page {
        println!("  - {}", resource.id());
    }

    // Follow the relationships of the first employee
    if let Some(first) = page.items.first() {
        println!("\n--- Employee Relationships ---");
        let mut employee = Employee::from_resource(first.clone())?;
        println!(
            "Employee: {} {}",
            employee.first_name()?,
            employee.last_name()?
        );

        if employee.has_relationship("packets") {
            let packets = employee.packets().await?;
            println!("  Packets: {}", packets.len());
        }

        if employee.has_relationship("candidate") {
            let candidate = Candidate::from_resource(employee.candidate().await?.clone())?;

            // Download the resume if there is one
            if candidate.has_resume() {
                let resume = candidate.resume().await?.bytes().await?;
                println!("  Resume: {} bytes", resume.len());
            }
        }
    }

    client.logout().await?;
    println!("\nDone!");
    Ok(())
}
