use std::time::Duration;

pub const DEFAULT_DELAY: Duration = Duration::from_millis(3000);
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(10_000);

/// How an accepted generation reaches completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationMode {
    /// Complete after a fixed delay without contacting the service.
    Simulated { delay: Duration },
    /// Fetch the locator and complete once the service answers.
    Remote { timeout: Duration },
}

impl Default for GenerationMode {
    fn default() -> Self {
        GenerationMode::Simulated {
            delay: DEFAULT_DELAY,
        }
    }
}

impl GenerationMode {
    /// Wait for the image behind `locator`. `Err` carries a reason fit for
    /// showing to the user.
    pub async fn run(&self, http: &reqwest::Client, locator: &str) -> Result<(), String> {
        match self {
            GenerationMode::Simulated { delay } => {
                tokio::time::sleep(*delay).await;
                Ok(())
            }
            GenerationMode::Remote { timeout } => {
                let response = http
                    .get(locator)
                    .timeout(*timeout)
                    .send()
                    .await
                    .map_err(|e| {
                        if e.is_timeout() {
                            format!("request timed out after {} ms", timeout.as_millis())
                        } else {
                            format!("request failed: {}", e)
                        }
                    })?;

                let status = response.status();
                if status.is_success() {
                    Ok(())
                } else {
                    Err(format!("image service returned {}", status))
                }
            }
        }
    }
}
