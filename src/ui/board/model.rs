use crate::store::PriorityBuckets;
use crate::task::Priority;

/// Cursor position on the board: a column (priority bucket) and a row
/// within it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    pub column: Priority,
    pub row: usize,
}

impl Default for Selection {
    fn default() -> Self {
        Self {
            column: Priority::High,
            row: 0,
        }
    }
}

impl Selection {
    /// Clamp the cursor to the current bucket contents. An empty board
    /// leaves the cursor where it is; rendering treats it as no selection.
    pub fn clamp(&mut self, buckets: &PriorityBuckets) {
        let len = buckets.bucket(self.column).len();
        if len == 0 {
            self.row = 0;
        } else if self.row >= len {
            self.row = len - 1;
        }
    }

    pub fn move_up(&mut self) {
        self.row = self.row.saturating_sub(1);
    }

    pub fn move_down(&mut self, buckets: &PriorityBuckets) {
        let len = buckets.bucket(self.column).len();
        if len > 0 && self.row + 1 < len {
            self.row += 1;
        }
    }

    /// Columns are laid out high, medium, low from left to right.
    pub fn move_left(&mut self, buckets: &PriorityBuckets) {
        self.column = match self.column {
            Priority::High => Priority::High,
            Priority::Medium => Priority::High,
            Priority::Low => Priority::Medium,
        };
        self.clamp(buckets);
    }

    pub fn move_right(&mut self, buckets: &PriorityBuckets) {
        self.column = match self.column {
            Priority::High => Priority::Medium,
            Priority::Medium => Priority::Low,
            Priority::Low => Priority::Low,
        };
        self.clamp(buckets);
    }

    /// Id of the task under the cursor, if any.
    pub fn selected_id(&self, buckets: &PriorityBuckets) -> Option<String> {
        buckets
            .bucket(self.column)
            .get(self.row)
            .map(|task| task.id.clone())
    }

    /// Re-home the cursor after a mutation: stay on the same task if it
    /// still exists anywhere, otherwise clamp within the current column.
    pub fn follow(&mut self, buckets: &PriorityBuckets, previous_id: Option<&str>) {
        if let Some(id) = previous_id {
            for priority in Priority::ALL {
                if let Some(row) = buckets
                    .bucket(priority)
                    .iter()
                    .position(|task| task.id == id)
                {
                    self.column = priority;
                    self.row = row;
                    return;
                }
            }
        }
        self.clamp(buckets);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::Task;

    fn buckets(low: usize, medium: usize, high: usize) -> PriorityBuckets {
        let mut b = PriorityBuckets::default();
        for i in 0..low {
            b.low.push(task(&format!("l{i}"), Priority::Low));
        }
        for i in 0..medium {
            b.medium.push(task(&format!("m{i}"), Priority::Medium));
        }
        for i in 0..high {
            b.high.push(task(&format!("h{i}"), Priority::High));
        }
        b
    }

    fn task(id: &str, priority: Priority) -> Task {
        let mut t = Task::new(id, priority);
        t.id = id.to_string();
        t
    }

    #[test]
    fn down_stops_at_last_row() {
        let b = buckets(0, 0, 2);
        let mut sel = Selection::default();
        sel.move_down(&b);
        assert_eq!(sel.row, 1);
        sel.move_down(&b);
        assert_eq!(sel.row, 1);
    }

    #[test]
    fn left_right_walk_the_columns() {
        let b = buckets(1, 1, 1);
        let mut sel = Selection::default();
        assert_eq!(sel.column, Priority::High);
        sel.move_right(&b);
        assert_eq!(sel.column, Priority::Medium);
        sel.move_right(&b);
        assert_eq!(sel.column, Priority::Low);
        sel.move_right(&b);
        assert_eq!(sel.column, Priority::Low);
        sel.move_left(&b);
        assert_eq!(sel.column, Priority::Medium);
    }

    #[test]
    fn clamp_after_shrink() {
        let b = buckets(0, 0, 3);
        let mut sel = Selection::default();
        sel.row = 2;
        let shrunk = buckets(0, 0, 1);
        sel.clamp(&shrunk);
        assert_eq!(sel.row, 0);
    }

    #[test]
    fn follow_tracks_task_across_columns() {
        let mut b = buckets(1, 0, 1);
        let mut sel = Selection::default();
        assert_eq!(sel.selected_id(&b), Some("h0".to_string()));

        // the selected task moves to the low bucket
        let mut moved = b.high.remove(0);
        moved.priority = Priority::Low;
        b.low.push(moved);

        sel.follow(&b, Some("h0"));
        assert_eq!(sel.column, Priority::Low);
        assert_eq!(sel.selected_id(&b), Some("h0".to_string()));
    }

    #[test]
    fn selected_id_empty_board() {
        let b = buckets(0, 0, 0);
        let sel = Selection::default();
        assert_eq!(sel.selected_id(&b), None);
    }
}
