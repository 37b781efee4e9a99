use std::time::Duration;

use clap::Args;
use tokio::sync::watch;

use skillcast::config::AppConfig;
use skillcast::error::AppError;
use skillcast::marketplace::applications::ApplicationStatus;
use skillcast::marketplace::jobs::{parse_skill_list, JobDraft};
use skillcast::marketplace::profiles::{EmployerProfileForm, Role, StudentProfileForm};
use skillcast::session::{Flow, SessionError, SessionSnapshot};

use crate::infra::Backend;

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Student address for the walkthrough (must match the configured
    /// institutional domain)
    #[arg(long)]
    pub(crate) student_email: Option<String>,
    /// Employer address for the walkthrough
    #[arg(long)]
    pub(crate) employer_email: Option<String>,
}

pub(crate) async fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let backend = Backend::bootstrap(&config);

    let student_email = args
        .student_email
        .unwrap_or_else(|| format!("agnesa@{}", config.signup.student_email_domain));
    let employer_email = args
        .employer_email
        .unwrap_or_else(|| "hr@nexuslabs.example".to_string());

    println!("SkillCast walkthrough");
    println!("=====================");

    let mut receiver = backend.session.subscribe();

    println!("\nRegistering accounts");
    backend
        .session
        .sign_up(&student_email, "Abc123", Role::Student)
        .await?;
    println!("- student {student_email}: verification email requested");
    backend
        .session
        .sign_up(&employer_email, "Abc123", Role::Employer)
        .await?;
    println!("- employer {employer_email}: verification email requested");

    match backend.session.log_in(&student_email, "Abc123").await {
        Err(error) => println!("- early login rejected: {error}"),
        Ok(_) => println!("- early login unexpectedly succeeded"),
    }

    println!("\nVerifying addresses (as if the emailed links were clicked)");
    backend
        .provider
        .verify_email(&student_email)
        .map_err(SessionError::from)?;
    backend
        .provider
        .verify_email(&employer_email)
        .map_err(SessionError::from)?;
    println!("- both addresses verified");

    println!("\nStudent onboarding");
    let student = backend.session.log_in(&student_email, "Abc123").await?;
    settle(&mut receiver, Flow::CompleteStudentProfile).await?;
    println!("- flow after login: {}", Flow::CompleteStudentProfile.label());
    backend
        .profiles
        .complete_student_profile(
            &student.id,
            StudentProfileForm {
                first_name: "Agnesa".to_string(),
                last_name: "Berisha".to_string(),
                headline: "Computer science student".to_string(),
                about: "Final year, interested in mobile development.".to_string(),
                portfolio_url: String::new(),
                skills: parse_skill_list("JavaScript, React Native"),
            },
        )
        .await?;
    settle(&mut receiver, Flow::StudentHome).await?;
    println!("- profile complete, flow: {}", Flow::StudentHome.label());
    backend.session.log_out().await?;

    println!("\nEmployer onboarding");
    let employer = backend.session.log_in(&employer_email, "Abc123").await?;
    settle(&mut receiver, Flow::CompleteEmployerProfile).await?;
    backend
        .profiles
        .complete_employer_profile(
            &employer.id,
            EmployerProfileForm {
                company_name: "Nexus Labs".to_string(),
                industry: "Software Development".to_string(),
                location: "Mitrovica, Kosovo".to_string(),
                website: "https://nexuslabs.example".to_string(),
                description: "Product studio hiring junior engineers.".to_string(),
            },
        )
        .await?;
    settle(&mut receiver, Flow::EmployerHome).await?;
    println!("- profile complete, flow: {}", Flow::EmployerHome.label());

    println!("\nPosting a job");
    let job = backend
        .jobs
        .post(
            &employer.id,
            JobDraft {
                title: "React Native Intern".to_string(),
                company: "Nexus Labs".to_string(),
                description: "Build and ship mobile features.".to_string(),
                salary: "350 EUR/month".to_string(),
                skills: parse_skill_list("React Native, JavaScript"),
            },
        )
        .await?;
    println!("- {} at {} ({})", job.title, job.company, job.salary);

    println!("\nStudent applies");
    let already = backend
        .applications
        .has_applied(&job.id, &student.id)
        .await?;
    println!("- already applied before submitting: {already}");
    let application = backend
        .applications
        .apply(&student.id, &job.id, "I ship mobile features.")
        .await?;
    println!(
        "- submitted to {} ({})",
        application.job_title,
        application.status.label()
    );
    match backend
        .applications
        .apply(&student.id, &job.id, "Second attempt.")
        .await
    {
        Err(error) => println!("- duplicate attempt rejected: {error}"),
        Ok(_) => println!("- duplicate attempt unexpectedly succeeded"),
    }

    println!("\nEmployer reviews");
    let applicants = backend.applications.applicants(&job.id, &employer.id).await?;
    for view in &applicants {
        println!(
            "- {} <{}>: {}",
            view.student_name,
            view.student_email,
            view.application.cover_letter
        );
    }
    backend
        .applications
        .decide(&application.id, &employer.id, ApplicationStatus::Accepted)
        .await?;
    println!("- {} accepted", application.student_name);

    println!("\nStudent inbox");
    for record in backend.applications.submissions(&student.id).await? {
        println!(
            "- {} at {}: {}",
            record.job_title,
            record.company_name,
            record.status.label()
        );
    }

    println!("\nRetiring the posting");
    backend.jobs.close(&job.id, &employer.id).await?;
    println!(
        "- board now lists {} active jobs",
        backend.jobs.board().await?.len()
    );
    println!(
        "- employer still sees {} posting(s) in their own list",
        backend.jobs.listings(&employer.id).await?.len()
    );

    println!("\nWalkthrough complete.");
    Ok(())
}

/// Wait for the session worker to publish a snapshot that maps to the wanted
/// flow. The demo drives a single device, so every transition settles fast;
/// the timeout only guards against a wedged stream.
async fn settle(
    receiver: &mut watch::Receiver<SessionSnapshot>,
    want: Flow,
) -> Result<SessionSnapshot, AppError> {
    tokio::time::timeout(Duration::from_secs(2), async {
        loop {
            {
                let current = receiver.borrow();
                if Flow::for_snapshot(&current) == want {
                    return current.clone();
                }
            }
            if receiver.changed().await.is_err() {
                return receiver.borrow().clone();
            }
        }
    })
    .await
    .map_err(|_| {
        AppError::Io(std::io::Error::new(
            std::io::ErrorKind::TimedOut,
            format!("session never settled on {}", want.label()),
        ))
    })
}
