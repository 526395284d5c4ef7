use embassy_time::{Instant, Timer};
use sampler::Clock;

/// The embassy time driver, running off TIMG0.
pub struct EmbassyClock;

impl Clock for EmbassyClock {
    fn now(&self) -> Instant {
        Instant::now()
    }

    async fn sleep_until(&mut self, deadline: Instant) {
        Timer::at(deadline).await
    }
}
