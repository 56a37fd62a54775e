use log::info;

/// Statistics that outlive a single game
#[derive(Debug, Default)]
pub struct GameMetrics {
    pub games_played: u32,
    pub longest_snake: usize,
}

impl GameMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_game_over(&mut self, final_length: usize, time_played: u64) {
        self.games_played += 1;
        self.longest_snake = self.longest_snake.max(final_length);
        info!(
            "Game {} finished: length {}, {} played",
            self.games_played,
            final_length,
            Self::format_time(time_played)
        );
    }

    /// `mm:ss`, minutes unbounded
    pub fn format_time(total_secs: u64) -> String {
        let minutes = total_secs / 60;
        let seconds = total_secs % 60;
        format!("{:02}:{:02}", minutes, seconds)
    }
}
