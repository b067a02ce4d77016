use std::collections::BTreeMap;

type Range = std::ops::Range<usize>;

/// An index allocator that keeps its free space as ordered, coalesced ranges.
///
/// Allocation is first-fit in index order, so a single-index allocation always
/// returns the lowest free index.
#[derive(Default, Debug)]
pub struct RangeAllocator {
	used: usize,
	capacity: usize,
	ranges: BTreeMap<usize, Range>,
}

impl RangeAllocator {
	/// Create a new [RangeAllocator]
	pub fn new() -> Self {
		Self::default()
	}

	/// Create a new [RangeAllocator] with the specified capacity.
	///
	/// # Arguments
	/// * `capacity` - A usize representing the container's target capacity
	pub fn with_capacity(capacity: usize) -> Self {
		let mut allocator = Self::default();
		allocator.reserve(capacity);
		allocator
	}

	/// Allocate the lowest free chunk of size \[size].
	/// The function returns None if there are no free chunks large enough.
	///
	/// # Arguments
	/// * `size` - The size of the chunk to allocate
	pub fn try_allocate(&mut self, size: usize) -> Option<Range> {
		let start = self.ranges.values().find(|r| r.len() >= size).map(|r| r.start)?;
		let mut range = self.ranges.remove(&start)?;

		let used = range.start..range.start + size;
		range.start += size;
		if !range.is_empty() {
			self.ranges.insert(range.start, range);
		}

		self.used += size;
		Some(used)
	}

	/// Return a range to the allocator, merging it with its free neighbours.
	///
	/// # Arguments
	/// * `range` - The range to be returned to the allocator. Ranges should never be returned twice.
	pub fn free(&mut self, range: Range) {
		if range.is_empty() {
			return;
		}
		debug_assert!(range.end <= self.capacity, "Freed range is out of bounds");

		self.used -= range.len();
		let mut merged = range;

		if let Some(next) = self.ranges.remove(&merged.end) {
			merged.end = next.end;
		}

		let previous = self.ranges.range(..merged.start).next_back().map(|(k, r)| (*k, r.end));
		if let Some((key, end)) = previous {
			debug_assert!(end <= merged.start, "Freed range overlaps a free range");
			if end == merged.start {
				merged.start = key;
			}
		}

		self.ranges.insert(merged.start, merged);
	}

	/// Get the amount of available space left to the allocator.
	pub fn available(&self) -> usize {
		self.capacity - self.used
	}

	/// Get the amount of allocated space.
	pub fn used(&self) -> usize {
		self.used
	}

	/// Get the total capacity of the allocator.
	pub fn capacity(&self) -> usize {
		self.capacity
	}

	/// Reserve an additional chunk of size \[size] at the end of the allocator.
	/// # Arguments
	/// * `size` - The size of the chunk to reserve
	pub fn reserve(&mut self, size: usize) {
		if size == 0 {
			return;
		}
		let start = self.capacity;
		self.capacity += size;
		self.used += size;
		self.free(start..self.capacity);
	}
}
