//! The weekly grid derived from the subjects, and its aggregation into display blocks

use crate::subject::{Color, Subject};
use crate::timeslot::{Hour, TimeslotKey, Weekday, HOURS_PER_DAY};

/// What a slot of the grid resolves to
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ScheduleSlot {
    pub subject: Option<String>,
    pub color: Option<Color>,
}

impl ScheduleSlot {
    pub fn is_empty(&self) -> bool {
        self.subject.is_none()
    }
}


/// The subject assignment of every (day, hour) of a week
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ScheduleGrid {
    days: [[ScheduleSlot; HOURS_PER_DAY]; 5],
}

impl ScheduleGrid {
    /// Resolve every slot of the week.
    ///
    /// Subjects are scanned in the given order, the first one that claims a slot gets it.
    pub fn build(subjects: &[Subject]) -> Self {
        let mut grid = Self::default();
        for key in TimeslotKey::all() {
            if let Some(subject) = subjects.iter().find(|s| s.claims(&key)) {
                grid.days[key.day().index()][key.hour().index()] = ScheduleSlot {
                    subject: Some(subject.name().to_string()),
                    color: Some(subject.color()),
                };
            }
        }
        grid
    }

    pub fn slot(&self, day: Weekday, hour: Hour) -> &ScheduleSlot {
        &self.days[day.index()][hour.index()]
    }

    pub fn day(&self, day: Weekday) -> &[ScheduleSlot; HOURS_PER_DAY] {
        &self.days[day.index()]
    }
}


/// A maximal run of hours of a day that resolve to the same subject and colour
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScheduleBlock {
    pub subject: Option<String>,
    pub color: Option<Color>,
    pub start_hour: usize,
    pub end_hour: usize,
    pub duration: usize,
}

impl ScheduleBlock {
    fn open(slot: &ScheduleSlot, hour: usize) -> Self {
        Self {
            subject: slot.subject.clone(),
            color: slot.color,
            start_hour: hour,
            end_hour: hour,
            duration: 1,
        }
    }

    fn matches(&self, slot: &ScheduleSlot) -> bool {
        self.subject == slot.subject && self.color == slot.color
    }

    /// Whether `hour` lies inside this block, past its first hour
    fn covers_after_start(&self, hour: usize) -> bool {
        self.start_hour < hour && self.end_hour >= hour
    }

    pub fn contains(&self, hour: usize) -> bool {
        self.start_hour <= hour && hour <= self.end_hour
    }
}


/// The blocks of a single day, ordered by start hour
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DayBlocks {
    blocks: Vec<ScheduleBlock>,
}

impl DayBlocks {
    pub fn blocks(&self) -> &[ScheduleBlock] {
        &self.blocks
    }

    /// The block that starts at `hour`, if any
    pub fn block_starting_at(&self, hour: usize) -> Option<&ScheduleBlock> {
        self.blocks.iter().find(|b| b.start_hour == hour)
    }

    /// Whether `hour` belongs to a block that started earlier. Renderers skip such cells.
    pub fn is_covered(&self, hour: usize) -> bool {
        self.blocks.iter().any(|b| b.covers_after_start(hour))
    }

    /// The block `hour` belongs to
    pub fn block_at(&self, hour: usize) -> Option<&ScheduleBlock> {
        self.blocks.iter().find(|b| b.contains(hour))
    }
}

/// Merge the slots of a day into blocks.
///
/// An hour that is already covered by a closed block is never opened again.
pub fn aggregate_day(slots: &[ScheduleSlot]) -> DayBlocks {
    let mut blocks: Vec<ScheduleBlock> = Vec::new();
    let mut current: Option<ScheduleBlock> = None;

    for (hour, slot) in slots.iter().enumerate() {
        match current.as_mut() {
            Some(block) if block.matches(slot) => {
                block.end_hour = hour;
                block.duration += 1;
                continue;
            },
            _ => {},
        }

        if let Some(block) = current.take() {
            blocks.push(block);
        }
        if blocks.iter().any(|b| b.covers_after_start(hour)) {
            log::trace!("Hour {} is already covered by a previous block", hour);
            continue;
        }
        current = Some(ScheduleBlock::open(slot, hour));
    }

    if let Some(block) = current {
        blocks.push(block);
    }
    DayBlocks { blocks }
}


/// The blocks of every day of the week
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WeekBlocks {
    days: [DayBlocks; 5],
}

impl WeekBlocks {
    pub fn day(&self, day: Weekday) -> &DayBlocks {
        &self.days[day.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = (Weekday, &DayBlocks)> {
        Weekday::ALL.iter().copied().zip(self.days.iter())
    }
}

/// Turns a [`ScheduleGrid`] into display blocks
pub struct BlockAggregator;

impl BlockAggregator {
    pub fn build(grid: &ScheduleGrid) -> WeekBlocks {
        let mut blocks = WeekBlocks::default();
        for &day in Weekday::ALL.iter() {
            blocks.days[day.index()] = aggregate_day(grid.day(day));
        }
        blocks
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::subject::SubjectId;

    fn subject(name: &str, color: Color, keys: &[&str]) -> Subject {
        let timeslots = keys.iter()
            .map(|k| (k.parse().unwrap(), true))
            .collect();
        Subject::new(SubjectId::random(), name.to_string(), color, timeslots)
    }

    fn slot(name: &str, color: Color) -> ScheduleSlot {
        ScheduleSlot { subject: Some(name.to_string()), color: Some(color) }
    }

    fn hour(h: u8) -> Hour {
        Hour::new(h).unwrap()
    }

    /// Every hour belongs to exactly one block, blocks are ordered, and no two neighbours could be merged
    fn assert_is_partition(day: &DayBlocks) {
        let mut next_hour = 0;
        for block in day.blocks() {
            assert_eq!(block.start_hour, next_hour);
            assert_eq!(block.duration, block.end_hour - block.start_hour + 1);
            next_hour = block.end_hour + 1;
        }
        assert_eq!(next_hour, HOURS_PER_DAY);
        for pair in day.blocks().windows(2) {
            assert!(pair[0].subject != pair[1].subject || pair[0].color != pair[1].color);
        }
    }

    #[test]
    fn math_example() {
        let math = subject("Math", Color::Red, &["Montag-0", "Montag-1"]);
        let grid = ScheduleGrid::build(&[math]);

        assert_eq!(grid.slot(Weekday::Montag, hour(0)).subject.as_deref(), Some("Math"));
        assert!(grid.slot(Weekday::Montag, hour(2)).is_empty());

        let blocks = BlockAggregator::build(&grid);
        let monday = blocks.day(Weekday::Montag).blocks();
        assert_eq!(monday.len(), 2);
        assert_eq!(monday[0], ScheduleBlock {
            subject: Some("Math".to_string()),
            color: Some(Color::Red),
            start_hour: 0,
            end_hour: 1,
            duration: 2,
        });
        assert_eq!(monday[1].subject, None);
        assert_eq!(monday[1].start_hour, 2);
        assert_eq!(monday[1].end_hour, 7);
        assert_eq!(monday[1].duration, 6);
    }

    #[test]
    fn first_registered_subject_wins() {
        let first = subject("Math", Color::Red, &["Dienstag-4"]);
        let second = subject("Art", Color::Pink, &["Dienstag-4", "Dienstag-5"]);
        let grid = ScheduleGrid::build(&[first, second]);

        assert_eq!(grid.slot(Weekday::Dienstag, hour(4)).subject.as_deref(), Some("Math"));
        assert_eq!(grid.slot(Weekday::Dienstag, hour(5)).subject.as_deref(), Some("Art"));
    }

    #[test]
    fn identical_neighbours_merge() {
        let mut slots = vec![ScheduleSlot::default(); HOURS_PER_DAY];
        slots[1] = slot("Bio", Color::Green);
        slots[2] = slot("Bio", Color::Green);
        slots[4] = slot("PE", Color::Orange);
        slots[5] = slot("PE", Color::Orange);
        slots[6] = slot("PE", Color::Orange);

        let day = aggregate_day(&slots);
        assert_is_partition(&day);
        assert_eq!(day.block_starting_at(1).unwrap().duration, 2);
        assert_eq!(day.block_starting_at(4).unwrap().duration, 3);
        assert_eq!(day.blocks().len(), 5);
    }

    #[test]
    fn same_name_different_color_does_not_merge() {
        let mut slots = vec![ScheduleSlot::default(); HOURS_PER_DAY];
        slots[0] = slot("Bio", Color::Green);
        slots[1] = slot("Bio", Color::Teal);

        let day = aggregate_day(&slots);
        assert_is_partition(&day);
        assert_eq!(day.block_starting_at(0).unwrap().duration, 1);
        assert_eq!(day.block_starting_at(1).unwrap().duration, 1);
    }

    #[test]
    fn every_day_is_a_partition() {
        let subjects = vec![
            subject("Math", Color::Red, &["Montag-0", "Montag-7", "Mittwoch-3", "Mittwoch-4"]),
            subject("Deutsch", Color::Yellow, &["Montag-1", "Montag-2", "Freitag-0"]),
            subject("Musik", Color::Purple, &["Mittwoch-5", "Freitag-7"]),
        ];
        let blocks = BlockAggregator::build(&ScheduleGrid::build(&subjects));
        for (_, day) in blocks.iter() {
            assert_is_partition(day);
        }
        // An empty day is a single free block
        let tuesday = blocks.day(Weekday::Dienstag).blocks();
        assert_eq!(tuesday.len(), 1);
        assert_eq!(tuesday[0].duration, HOURS_PER_DAY);
    }

    #[test]
    fn covered_hours() {
        let math = subject("Math", Color::Red, &["Donnerstag-2", "Donnerstag-3", "Donnerstag-4"]);
        let blocks = BlockAggregator::build(&ScheduleGrid::build(&[math]));
        let thursday = blocks.day(Weekday::Donnerstag);

        assert!(thursday.is_covered(2) == false);
        assert!(thursday.is_covered(3));
        assert!(thursday.is_covered(4));
        assert!(thursday.is_covered(5) == false);
        assert_eq!(thursday.block_at(4).unwrap().start_hour, 2);
    }
}
