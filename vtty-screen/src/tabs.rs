/// Default tab interval.
const TAB_INTERVAL: usize = 8;

/// One boolean per column marking tab stop targets.
#[derive(Debug, Clone)]
pub(crate) struct TabStops {
    stops: Vec<bool>,
}

impl TabStops {
    pub(crate) fn new(width: usize) -> Self {
        let mut tabs = Self {
            stops: vec![false; width],
        };
        tabs.install_defaults();
        tabs
    }

    /// Stops at every eighth column, starting at column 8.
    pub(crate) fn install_defaults(&mut self) {
        for (column, stop) in self.stops.iter_mut().enumerate() {
            *stop = column != 0 && column % TAB_INTERVAL == 0;
        }
    }

    pub(crate) fn set(&mut self, column: usize) {
        if let Some(stop) = self.stops.get_mut(column) {
            *stop = true;
        }
    }

    pub(crate) fn clear(&mut self, column: usize) {
        if let Some(stop) = self.stops.get_mut(column) {
            *stop = false;
        }
    }

    pub(crate) fn clear_all(&mut self) {
        self.stops.fill(false);
    }

    /// The next stop strictly right of `column`, if any.
    pub(crate) fn next_after(&self, column: usize) -> Option<usize> {
        self.stops
            .iter()
            .enumerate()
            .skip(column + 1)
            .find_map(|(index, &stop)| stop.then_some(index))
    }

    pub(crate) fn is_set(&self, column: usize) -> bool {
        self.stops.get(column).copied().unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_every_eighth_column() {
        let tabs = TabStops::new(80);
        assert!(!tabs.is_set(0));
        assert!(tabs.is_set(8));
        assert!(tabs.is_set(16));
        assert!(!tabs.is_set(12));
        assert_eq!(tabs.next_after(0), Some(8));
        assert_eq!(tabs.next_after(8), Some(16));
        assert_eq!(tabs.next_after(77), None);
    }

    #[test]
    fn set_and_clear() {
        let mut tabs = TabStops::new(20);
        tabs.set(3);
        assert_eq!(tabs.next_after(0), Some(3));
        tabs.clear(3);
        assert_eq!(tabs.next_after(0), Some(8));
        tabs.clear_all();
        assert_eq!(tabs.next_after(0), None);
    }
}
