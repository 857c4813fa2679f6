use super::{Address, Val};
use crate::error;
use crate::lang::Error;
use std::collections::HashMap;

type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    pub start: Address,
    pub size: usize,
    pub free: bool,
}

impl Region {
    fn end(&self) -> Address {
        self.start + self.size
    }
}

/// ## Simulated heap
///
/// A fixed number of value slots split into regions. The regions are kept in
/// address order, tile `[0, capacity)` exactly, and never leave two free
/// regions side by side.

#[derive(Debug, Clone)]
pub struct Heap {
    capacity: usize,
    regions: Vec<Region>,
    slots: HashMap<Address, Val>,
}

impl Heap {
    pub fn new(capacity: usize) -> Heap {
        Heap {
            capacity,
            regions: vec![Region {
                start: 0,
                size: capacity,
                free: true,
            }],
            slots: HashMap::new(),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    pub fn used_regions(&self) -> impl Iterator<Item = &Region> {
        self.regions.iter().filter(|r| !r.free)
    }

    /// First fit. The chosen region is split into the used part followed by
    /// the free remainder, if any.
    pub fn alloc(&mut self, size: usize) -> Result<Address> {
        if size == 0 {
            return Err(error!(InvalidAllocation; "cannot allocate 0 slots"));
        }
        let index = match self.regions.iter().position(|r| r.free && r.size >= size) {
            Some(index) => index,
            None => {
                return Err(error!(OutOfMemory; format!("no free region of {} slots", size)))
            }
        };
        let region = self.regions[index];
        self.regions[index] = Region {
            start: region.start,
            size,
            free: false,
        };
        if region.size > size {
            self.regions.insert(
                index + 1,
                Region {
                    start: region.start + size,
                    size: region.size - size,
                    free: true,
                },
            );
        }
        self.condense();
        Ok(region.start)
    }

    pub fn free(&mut self, pointer: Address) -> Result<()> {
        let index = match self
            .regions
            .iter()
            .position(|r| r.start == pointer && !r.free)
        {
            Some(index) => index,
            None => {
                return Err(error!(InvalidPointer; format!("{} is not an allocated region", pointer)))
            }
        };
        let region = &mut self.regions[index];
        region.free = true;
        for address in region.start..region.end() {
            self.slots.remove(&address);
        }
        self.condense();
        Ok(())
    }

    /// Merge adjacent free regions until none remain.
    pub fn condense(&mut self) {
        let mut index = 0;
        while index + 1 < self.regions.len() {
            if self.regions[index].free && self.regions[index + 1].free {
                let next = self.regions.remove(index + 1);
                self.regions[index].size += next.size;
                index = 0;
            } else {
                index += 1;
            }
        }
    }

    pub fn save(&mut self, pointer: Address, value: Val) -> Result<()> {
        self.check_used(pointer)?;
        self.slots.insert(pointer, value);
        Ok(())
    }

    pub fn load(&self, pointer: Address) -> Result<Val> {
        self.check_used(pointer)?;
        match self.slots.get(&pointer) {
            Some(value) => Ok(value.clone()),
            None => Err(error!(UninitializedMemory; format!("slot {} was never written", pointer))),
        }
    }

    fn check_used(&self, pointer: Address) -> Result<()> {
        if pointer >= self.capacity {
            return Err(error!(InvalidPointer; format!(
                "{} is outside the heap of {} slots",
                pointer, self.capacity
            )));
        }
        let index = match self.regions.binary_search_by(|r| r.start.cmp(&pointer)) {
            Ok(index) => index,
            Err(index) => index - 1,
        };
        if self.regions[index].free {
            Err(error!(InvalidPointer; format!("{} is not in an allocated region", pointer)))
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lang::ErrorCode;

    fn free_region(start: Address, size: usize) -> Region {
        Region {
            start,
            size,
            free: true,
        }
    }

    #[test]
    fn test_alloc_free_round_trip() {
        let mut heap = Heap::new(100);
        let p = heap.alloc(10).unwrap();
        assert_eq!(p, 0);
        assert_eq!(heap.regions().len(), 2);
        heap.free(p).unwrap();
        assert_eq!(heap.regions(), &[free_region(0, 100)]);
    }

    #[test]
    fn test_free_in_order_coalesces() {
        let mut heap = Heap::new(100);
        let a = heap.alloc(3).unwrap();
        let b = heap.alloc(5).unwrap();
        assert_eq!(b, 3);
        heap.free(a).unwrap();
        assert_eq!(heap.regions()[0], free_region(0, 3));
        heap.free(b).unwrap();
        assert_eq!(heap.regions(), &[free_region(0, 100)]);
    }

    #[test]
    fn test_first_fit_reuses_hole() {
        let mut heap = Heap::new(20);
        let a = heap.alloc(4).unwrap();
        let _b = heap.alloc(4).unwrap();
        heap.free(a).unwrap();
        assert_eq!(heap.alloc(2).unwrap(), 0);
        assert_eq!(heap.alloc(4).unwrap(), 8);
        assert_eq!(heap.alloc(2).unwrap(), 2);
    }

    #[test]
    fn test_exact_fit_leaves_no_empty_region() {
        let mut heap = Heap::new(4);
        assert_eq!(heap.alloc(4).unwrap(), 0);
        assert_eq!(heap.regions().len(), 1);
        assert_eq!(heap.alloc(1).unwrap_err().code(), ErrorCode::OutOfMemory);
    }

    #[test]
    fn test_regions_tile_capacity() {
        let mut heap = Heap::new(50);
        let ptrs: Vec<Address> = (1..6).map(|n| heap.alloc(n).unwrap()).collect();
        heap.free(ptrs[1]).unwrap();
        heap.free(ptrs[3]).unwrap();
        heap.free(ptrs[2]).unwrap();
        let mut next = 0;
        for pair in heap.regions().windows(2) {
            assert!(!(pair[0].free && pair[1].free));
        }
        for region in heap.regions() {
            assert_eq!(region.start, next);
            next = region.end();
        }
        assert_eq!(next, 50);
    }

    #[test]
    fn test_save_load() {
        let mut heap = Heap::new(10);
        let p = heap.alloc(2).unwrap();
        heap.save(p + 1, Val::from("x")).unwrap();
        assert_eq!(heap.load(p + 1).unwrap(), Val::from("x"));
        assert_eq!(
            heap.load(p).unwrap_err().code(),
            ErrorCode::UninitializedMemory
        );
        assert_eq!(
            heap.save(p + 2, Val::from("y")).unwrap_err().code(),
            ErrorCode::InvalidPointer
        );
        assert_eq!(
            heap.load(10).unwrap_err().code(),
            ErrorCode::InvalidPointer
        );
        heap.free(p).unwrap();
        assert_eq!(heap.load(p + 1).unwrap_err().code(), ErrorCode::InvalidPointer);
    }

    #[test]
    fn test_double_free() {
        let mut heap = Heap::new(10);
        let p = heap.alloc(2).unwrap();
        heap.free(p).unwrap();
        assert_eq!(heap.free(p).unwrap_err().code(), ErrorCode::InvalidPointer);
        assert_eq!(heap.alloc(0).unwrap_err().code(), ErrorCode::InvalidAllocation);
    }
}
