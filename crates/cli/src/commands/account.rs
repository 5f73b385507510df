//! Account commands: register, login, logout, profile.

use monsoon_storefront::{ProfileUpdate, Registration, Storefront};

/// Create a new account.
///
/// # Errors
///
/// Returns an error if validation fails or the auth service rejects the
/// registration.
pub async fn register(
    storefront: &Storefront,
    email: String,
    password: String,
    confirm_password: Option<String>,
    first_name: String,
    last_name: String,
) -> Result<(), Box<dyn std::error::Error>> {
    let registration = Registration {
        email,
        confirm_password: confirm_password.unwrap_or_else(|| password.clone()),
        password,
        first_name,
        last_name,
    };
    storefront.session().register(registration).await?;
    println!("Account created. Log in with `monsoon login`.");
    Ok(())
}

/// Log in and persist the session token.
///
/// # Errors
///
/// Returns an error for bad credentials or a network failure.
pub async fn login(
    storefront: &Storefront,
    email: &str,
    password: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let user = storefront.session().login(email, password).await?;
    println!("Logged in as {} <{}>.", user.full_name(), user.email);
    if let Some(session) = storefront.session().session() {
        println!("Session valid until {}.", session.expires_at);
    }
    Ok(())
}

/// Log out and clear the persisted token.
pub fn logout(storefront: &Storefront) {
    storefront.session().logout();
    println!("Logged out.");
}

/// Show the current profile.
///
/// # Errors
///
/// Returns an error if no session can be restored.
pub async fn profile_show(storefront: &Storefront) -> Result<(), Box<dyn std::error::Error>> {
    let Some(user) = storefront.session().initialize().await else {
        return Err("not logged in".into());
    };

    println!("{} <{}>", user.full_name(), user.email);
    if let Some(profile) = &user.profile {
        let field = |label: &str, value: &Option<String>| {
            println!("  {label}: {}", value.as_deref().unwrap_or("-"));
        };
        field("Date of birth", &profile.date_of_birth);
        field("Street address", &profile.address_line1);
        field("Address line 2", &profile.address_line2);
        field("Landmark", &profile.landmark);
        field("City", &profile.city);
        field("State/Province", &profile.state);
        field("ZIP/Postal code", &profile.pincode);
        field("Country", &profile.country);
        field("Contact number", &profile.contact_number);
    } else {
        println!("  (no shipping profile yet)");
    }
    Ok(())
}

/// Apply a partial profile update.
///
/// # Errors
///
/// Returns an error if no session can be restored or the update fails.
pub async fn profile_update(
    storefront: &Storefront,
    update: ProfileUpdate,
) -> Result<(), Box<dyn std::error::Error>> {
    if storefront.session().initialize().await.is_none() {
        return Err("not logged in".into());
    }

    match storefront.session().update_profile(update).await? {
        Some(_) => println!("Profile updated."),
        None => println!("Profile update submitted, but the session ended meanwhile."),
    }
    Ok(())
}
