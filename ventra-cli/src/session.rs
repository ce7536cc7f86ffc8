//! Interactive session: prompt, search, render, repeat.

use anyhow::Context;
use inquire::{InquireError, Text};
use tracing::debug;
use ventra_core::{DayNightTicker, SearchController, SystemClock, TICK_PERIOD, WeatherProvider};

use crate::render;

/// Runs until the user cancels the prompt. The day/night ticker lives exactly as long
/// as the session.
pub async fn run(provider: Box<dyn WeatherProvider>) -> anyhow::Result<()> {
    let ticker = DayNightTicker::spawn(SystemClock, TICK_PERIOD);
    let mut controller = SearchController::new(provider, ticker.current());

    print!("{}", render::screen(controller.state()));

    loop {
        let Some(query) = prompt_city().await? else {
            break;
        };

        controller.apply_tick(ticker.current());
        controller.set_query(query);

        let Some(request) = controller.begin_search() else {
            println!("Please type a city name.");
            continue;
        };
        print!("{}", render::screen(controller.state()));

        let outcome = controller.fetch(&request).await;
        controller.finish_search(outcome);
        controller.apply_tick(ticker.current());

        println!();
        print!("{}", render::screen(controller.state()));
    }

    ticker.stop();
    debug!("interactive session ended");
    Ok(())
}

/// `None` when the user pressed Esc or Ctrl-C.
async fn prompt_city() -> anyhow::Result<Option<String>> {
    let answer = tokio::task::spawn_blocking(|| {
        Text::new("City:")
            .with_placeholder("Search for a city...")
            .prompt()
    })
    .await
    .context("Prompt task panicked")?;

    match answer {
        Ok(text) => Ok(Some(text)),
        Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => Ok(None),
        Err(e) => Err(e).context("Failed to read city name"),
    }
}
