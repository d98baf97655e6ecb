use log::debug;
use math::DoomRandom;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateResult {
    Continuing,
    Completed,
}

/// The screen melt. Tracks how far each band of the old frame has slid down;
/// copying the pixels is up to the caller.
#[derive(Debug, Clone)]
pub struct WipeEffect {
    y: Vec<i32>,
    height: i32,
    rng: DoomRandom,
    done: bool,
}

impl WipeEffect {
    /// `band_count` offsets sliding to `height`. The offsets are not usable
    /// until `start` is called.
    pub fn new(band_count: usize, height: i32, seed: u32) -> Self {
        Self {
            y: vec![0; band_count],
            height,
            rng: DoomRandom::new(seed),
            done: false,
        }
    }

    /// Seed each band with a short delay. Neighbouring bands differ by at
    /// most one tic so the melt edge is ragged rather than noisy.
    pub fn start(&mut self) {
        self.done = false;
        if self.y.is_empty() {
            return;
        }
        self.y[0] = -(self.rng.m_random() % 16);
        for i in 1..self.y.len() {
            let r = (self.rng.m_random() % 3) - 1;
            self.y[i] = self.y[i - 1] + r;
            if self.y[i] > 0 {
                self.y[i] = 0;
            } else if self.y[i] <= -16 {
                self.y[i] = -15;
            }
        }
        debug!("Wipe started, {} bands to {}", self.y.len(), self.height);
    }

    /// Advance one tic
    pub fn update(&mut self) -> UpdateResult {
        let mut done = true;
        for y in self.y.iter_mut() {
            if *y < 0 {
                // This is the offset to start with, sort of like a timer
                *y += 1;
                done = false;
            } else if *y < self.height {
                let mut dy = (*y + 1).min(8);
                if *y + dy >= self.height {
                    dy = self.height - *y;
                }
                *y += dy;
                done = false;
            }
        }
        if done {
            if !self.done {
                debug!("Wipe complete");
            }
            self.done = true;
            UpdateResult::Completed
        } else {
            UpdateResult::Continuing
        }
    }

    /// Current offset of every band
    #[inline]
    pub fn y(&self) -> &[i32] {
        &self.y
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.height
    }

    #[inline]
    pub fn is_done(&self) -> bool {
        self.done
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_offsets() {
        for seed in [0, 1, 77, 255] {
            let mut wipe = WipeEffect::new(321, 200, seed);
            wipe.start();
            let y = wipe.y();
            assert!(y.iter().all(|v| (-15..=0).contains(v)), "seed {seed}");
            assert!(y.windows(2).all(|w| (w[0] - w[1]).abs() <= 1));
        }
    }

    #[test]
    fn same_seed_same_melt() {
        let mut a = WipeEffect::new(50, 100, 9);
        let mut b = WipeEffect::new(50, 100, 9);
        a.start();
        b.start();
        assert_eq!(a.y(), b.y());
    }

    #[test]
    fn terminates_exactly_at_height() {
        let mut wipe = WipeEffect::new(321, 200, 3);
        wipe.start();
        let mut tics = 0;
        let mut last = wipe.y().to_vec();
        while wipe.update() == UpdateResult::Continuing {
            tics += 1;
            assert!(tics < 100, "wipe never finished");
            // never moves up, never overshoots
            for (now, before) in wipe.y().iter().zip(&last) {
                assert!(now >= before);
                assert!(*now <= 200);
            }
            last = wipe.y().to_vec();
        }
        assert!(wipe.is_done());
        assert!(wipe.y().iter().all(|y| *y == 200));
        // stays complete
        assert_eq!(wipe.update(), UpdateResult::Completed);
    }

    #[test]
    fn acceleration() {
        let mut wipe = WipeEffect::new(1, 100, 0);
        // not started, offsets at zero
        let mut seen = Vec::new();
        for _ in 0..6 {
            wipe.update();
            seen.push(wipe.y()[0]);
        }
        assert_eq!(seen, [1, 3, 7, 15, 23, 31]);
    }

    #[test]
    fn empty_is_complete() {
        let mut wipe = WipeEffect::new(0, 200, 0);
        wipe.start();
        assert_eq!(wipe.update(), UpdateResult::Completed);
    }
}
