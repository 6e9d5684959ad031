//! Command implementations. Each command drives the same screen
//! controllers a graphical shell would.

use anyhow::{anyhow, Result};
use creaturedex_core::utils::{format_coordinates, truncate_string};
use creaturedex_core::{
    AppContext, CaptureOutcome, CatalogOrigin, Config, CreatureId, DetailScreen, HomeScreen,
    MapScreen, MarkerKind, Route, SettingsScreen,
};
use tracing::info;

use crate::cli::ThemeMode;

/// Width of the description column in `list`.
const DESCRIPTION_WIDTH: usize = 50;

pub async fn list(ctx: AppContext, favorites_only: bool) -> Result<()> {
    let mut home = HomeScreen::new(ctx);
    home.mount().await;
    if favorites_only {
        home.toggle_show_favorites();
    }

    print_origin(&home);
    if let Some(message) = home.status_message() {
        println!("{}", message);
        return Ok(());
    }

    for creature in home.visible_creatures() {
        let star = if home.is_favorite(creature.id) { "*" } else { " " };
        println!(
            "{} {:>4}  {:<20} {}",
            star,
            creature.id,
            truncate_string(&creature.name, 20),
            truncate_string(&creature.description, DESCRIPTION_WIDTH)
        );
    }
    Ok(())
}

fn print_origin(home: &HomeScreen) {
    if home.origin() == Some(CatalogOrigin::Cache) {
        println!(
            "(offline - showing creatures cached {})",
            home.cache_age().unwrap_or("earlier")
        );
    }
}

/// Mount the home screen and follow the row for `id` to its detail screen.
async fn open_detail(ctx: AppContext, id: CreatureId) -> Result<DetailScreen> {
    let mut home = HomeScreen::new(ctx.clone());
    home.mount().await;
    match home.select(id) {
        Some(Route::Detail(creature)) => {
            let mut detail = DetailScreen::new(ctx, creature);
            detail.mount().await;
            Ok(detail)
        }
        _ => Err(anyhow!("No creature with id {}", id)),
    }
}

pub async fn show(ctx: AppContext, id: CreatureId) -> Result<()> {
    let detail = open_detail(ctx, id).await?;
    let creature = detail.creature();

    println!("{}{}", creature.name, if detail.is_favorite() { " *" } else { "" });
    println!("{}", creature.description);
    println!("{}", creature.first_spotted_display());
    println!("{}", format_coordinates(creature.coordinates()));
    match detail.image_uri() {
        Some(uri) => println!("Picture: {}", uri),
        None => println!("{}", detail.image_placeholder().unwrap_or_default()),
    }
    Ok(())
}

pub async fn favorite(ctx: AppContext, id: CreatureId) -> Result<()> {
    let mut detail = open_detail(ctx, id).await?;
    let was_favorite = detail.is_favorite();
    let now_favorite = detail.toggle_favorite().await;

    if was_favorite == now_favorite {
        return Err(anyhow!("Favorite status for {} was not changed", id));
    }
    println!(
        "{} {} favorites",
        detail.creature().name,
        if now_favorite { "added to" } else { "removed from" }
    );
    Ok(())
}

pub async fn photo(ctx: AppContext, id: CreatureId) -> Result<()> {
    let mut detail = open_detail(ctx, id).await?;
    match detail.take_picture().await {
        Some(CaptureOutcome::Saved { uri }) => {
            info!(creature_id = id, uri = %uri, "Picture attached");
            println!("Picture saved for {}: {}", detail.creature().name, uri);
            Ok(())
        }
        Some(CaptureOutcome::Cancelled) => {
            println!("No picture taken");
            Ok(())
        }
        Some(CaptureOutcome::PermissionDenied) | None => {
            Err(anyhow!("Picture was not taken"))
        }
    }
}

pub async fn map(ctx: AppContext, focus: Option<CreatureId>) -> Result<()> {
    let mut map = MapScreen::new(ctx);
    map.mount(None).await;
    if let Some(id) = focus {
        let creature = map
            .creatures()
            .iter()
            .find(|c| c.id == id)
            .cloned()
            .ok_or_else(|| anyhow!("No creature with id {}", id))?;
        map.navigate_to(&creature);
    }
    map.focus().await;
    map.poll_location();

    let region = map.region();
    println!(
        "Region: {} (span {:.3}° x {:.3}°)",
        format_coordinates(creaturedex_core::Coordinates {
            latitude: region.latitude,
            longitude: region.longitude,
        }),
        region.latitude_delta,
        region.longitude_delta
    );
    if let Some(message) = map.error_message() {
        println!("{}", message);
    }

    for marker in map.markers() {
        let inside = if region.contains(marker.coordinates) { "" } else { " (off screen)" };
        let label = match marker.kind {
            MarkerKind::Creature => marker.title.clone(),
            MarkerKind::User => format!("[{}]", marker.title),
        };
        println!(
            "{:<7} {:<24} {}{}{}",
            marker.color(),
            label,
            format_coordinates(marker.coordinates),
            marker
                .thumbnail
                .as_deref()
                .map(|t| format!("  photo: {}", t))
                .unwrap_or_default(),
            inside
        );
    }

    map.exit();
    Ok(())
}

pub fn theme(ctx: &AppContext, mode: Option<ThemeMode>) -> Result<()> {
    let settings = SettingsScreen::new(ctx.state.clone());
    match mode {
        Some(ThemeMode::Toggle) => {
            settings.toggle_dark_mode();
        }
        Some(ThemeMode::Dark) => ctx.state.set_dark_mode(true),
        Some(ThemeMode::Light) => ctx.state.set_dark_mode(false),
        None => {}
    }

    let dark = settings.is_dark_mode();
    if mode.is_some() {
        Config::store_dark_mode(dark)?;
    }
    println!("{}: {}", settings.dark_mode_label(), if dark { "on" } else { "off" });
    Ok(())
}

pub async fn stale(ctx: AppContext) -> Result<()> {
    let load = ctx.catalog.fetch_creatures().await;
    if load.origin == CatalogOrigin::Empty {
        return Err(anyhow!("No catalog available to compare against"));
    }

    let favorites = ctx.favorites.stale_ids(&load.creatures).await?;
    let images = ctx.images.stale_ids(&load.creatures).await?;

    if favorites.is_empty() && images.is_empty() {
        println!("No stale entries");
        return Ok(());
    }
    if !favorites.is_empty() {
        println!("Favorites for unknown creatures: {:?}", favorites);
    }
    if !images.is_empty() {
        println!("Pictures for unknown creatures: {:?}", images);
    }
    Ok(())
}
