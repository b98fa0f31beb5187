use verifyctl::errors::AmbiguousName;
use verifyctl::errors::ClassifiedError;
use verifyctl::errors::KindMismatch;
use verifyctl::errors::LoginExpired;
use verifyctl::errors::NoActiveSession;
use verifyctl::errors::ValidationError;
use verifyctl::run;

#[tokio::main]
async fn main() {
    let result = run().await;
    let error = match result {
        Err(error) => error,
        Ok(0) => return,
        Ok(num) => std::process::exit(num),
    };

    // Provide better error messages for cases where we can provide suggestions to the user.
    if let Some(error) = error.downcast_ref::<NoActiveSession>() {
        eprintln!("{}", error);
        eprintln!("Use:\n  verifyctl login -h");
        std::process::exit(1);
    }
    if let Some(ClassifiedError::Unauthenticated) = error.downcast_ref::<ClassifiedError>() {
        eprintln!("{:?}", error);
        eprintln!("The login session is missing or expired. Login again with 'verifyctl login'");
        std::process::exit(1);
    }
    if let Some(ClassifiedError::Forbidden) = error.downcast_ref::<ClassifiedError>() {
        eprintln!("{:?}", error);
        eprintln!(
            "Check the entitlements of the logged in client with 'verifyctl create <kind> --entitlements'"
        );
        std::process::exit(1);
    }
    if let Some(error) = error.downcast_ref::<AmbiguousName>() {
        eprintln!("{}", error);
        eprintln!("Select the resource by identifier with '--id' instead");
        std::process::exit(1);
    }
    if let Some(error) = error.downcast_ref::<LoginExpired>() {
        eprintln!("{}", error);
        eprintln!("Run 'verifyctl login' again and approve the login before the code expires");
        std::process::exit(1);
    }
    if let Some(error) = error.downcast_ref::<ValidationError>() {
        eprintln!("{}", error);
        std::process::exit(1);
    }
    if let Some(error) = error.downcast_ref::<KindMismatch>() {
        eprintln!("{}", error);
        std::process::exit(1);
    }

    // Print the error in detailed format for all other cases.
    eprintln!("{:?}", error);
    std::process::exit(1);
}
