use std::collections::VecDeque;

/// Queue of crossings whose neighbourhood changed and should be 
/// re-examined by the move catalog. Each index is queued at most once.
#[derive(Clone, Debug, Default)]
pub struct Worklist { 
    queue: VecDeque<usize>,
    queued: Vec<bool>,
}

impl Worklist { 
    pub fn new() -> Self { 
        Self::default()
    }

    pub fn push(&mut self, c: usize) { 
        if c >= self.queued.len() { 
            self.queued.resize(c + 1, false);
        }
        if !self.queued[c] { 
            self.queued[c] = true;
            self.queue.push_back(c);
        }
    }

    pub fn pop(&mut self) -> Option<usize> { 
        let c = self.queue.pop_front()?;
        self.queued[c] = false;
        Some(c)
    }

    pub fn len(&self) -> usize { 
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool { 
        self.queue.is_empty()
    }

    pub fn contains(&self, c: usize) -> bool { 
        self.queued.get(c).copied().unwrap_or(false)
    }

    pub fn clear(&mut self) { 
        self.queue.clear();
        self.queued.clear();
    }
}

impl Extend<usize> for Worklist {
    fn extend<T: IntoIterator<Item = usize>>(&mut self, iter: T) {
        for c in iter { 
            self.push(c)
        }
    }
}

#[cfg(test)]
mod tests { 
    use super::*;

    #[test]
    fn dedup() { 
        let mut w = Worklist::new();
        w.extend([3, 1, 3, 7, 1]);
        assert_eq!(w.len(), 3);
        assert!(w.contains(7));
        assert_eq!(w.pop(), Some(3));
        assert!(!w.contains(3));

        w.push(3);
        assert_eq!(w.pop(), Some(1));
        assert_eq!(w.pop(), Some(7));
        assert_eq!(w.pop(), Some(3));
        assert_eq!(w.pop(), None);
        assert!(w.is_empty());
    }
}
