use crate::darc::Darc;
use crate::diagram::Diagram;
use crate::error::DiagramError;

/// Derived data of a diagram. Valid only for the generation it was 
/// computed at; any mutation of the diagram advances the generation.
#[derive(Clone, Debug, Default)]
pub struct Cache { 
    generation: u64,
    pub(crate) link_components: Option<Vec<Vec<usize>>>,
    pub(crate) diagram_components: Option<Vec<Vec<usize>>>,
    pub(crate) faces: Option<Vec<Vec<Darc>>>,
}

impl Cache { 
    pub fn clear(&mut self) { 
        self.link_components = None;
        self.diagram_components = None;
        self.faces = None;
    }

    pub fn generation(&self) -> u64 { 
        self.generation
    }

    fn sync(&mut self, generation: u64) { 
        if self.generation != generation { 
            self.clear();
            self.generation = generation;
        }
    }
}

impl Diagram { 
    pub(crate) fn cached<T, G, F>(&self, get: G, compute: F) -> Result<T, DiagramError>
    where 
        T: Clone,
        G: Fn(&mut Cache) -> &mut Option<T>,
        F: FnOnce(&Diagram) -> Result<T, DiagramError>
    { 
        { 
            let mut cache = self.cache.borrow_mut();
            cache.sync(self.generation());
            if let Some(v) = get(&mut cache).as_ref() { 
                return Ok(v.clone())
            }
        }

        let v = compute(self)?;

        let mut cache = self.cache.borrow_mut();
        cache.sync(self.generation());
        *get(&mut cache) = Some(v.clone());

        Ok(v)
    }
}

#[cfg(test)]
mod tests { 
    use crate::diagram::tests::trefoil;

    #[test]
    fn invalidated_by_mutation() { 
        fn get(c: &mut super::Cache) -> &mut Option<Vec<Vec<usize>>> { 
            &mut c.link_components
        }

        let mut d = trefoil();

        let v = d.cached(get, |_| Ok(vec![vec![1]])).unwrap();
        assert_eq!(v, vec![vec![1]]);

        let v = d.cached(get, |_| Ok(vec![vec![2]])).unwrap();
        assert_eq!(v, vec![vec![1]]);

        d.touch();

        let v = d.cached(get, |_| Ok(vec![vec![3]])).unwrap();
        assert_eq!(v, vec![vec![3]]);
        assert_eq!(d.cache.borrow().generation(), d.generation());
    }

    #[test]
    fn cleared() { 
        let mut d = trefoil();
        d.link_component_count().unwrap();
        assert!(d.cache.borrow().link_components.is_some());

        d.clear_cache();
        assert!(d.cache.borrow().link_components.is_none());
    }
}
