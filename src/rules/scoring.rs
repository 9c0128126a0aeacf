use crate::components::progression::MAX_STARS;

/// Runs slower than this earn no stars.
pub const PAR_TIME_SECS: u32 = 180;
const SECS_PER_STAR: u32 = 60;
const BRAIN_STARS_PER_STAR: u32 = 10;

/// Time-based rating: three stars under a minute, one fewer per extra minute.
pub fn stars_for_time(elapsed_secs: u32) -> u8 {
    if elapsed_secs > PAR_TIME_SECS {
        return 0;
    }
    let earned = (PAR_TIME_SECS - elapsed_secs) / SECS_PER_STAR + 1;
    earned.min(MAX_STARS as u32) as u8
}

pub fn brain_stars_for(stars: u8) -> u32 {
    stars as u32 * BRAIN_STARS_PER_STAR
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fast_runs_cap_at_three_stars() {
        assert_eq!(stars_for_time(0), 3);
        assert_eq!(stars_for_time(45), 3);
    }

    #[test]
    fn rating_drops_per_minute() {
        assert_eq!(stars_for_time(121), 1);
        assert_eq!(stars_for_time(100), 2);
        assert_eq!(stars_for_time(180), 1);
        assert_eq!(stars_for_time(181), 0);
    }

    #[test]
    fn brain_stars_scale_with_rating() {
        assert_eq!(brain_stars_for(2), 20);
        assert_eq!(brain_stars_for(0), 0);
    }
}
