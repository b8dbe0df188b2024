//! Room traversal order
//!
//! Rooms are read like text: top to bottom in loose rows, left to right within
//! a row. Chaining rooms in this order gives corridors that flow across the
//! level instead of criss-crossing it.

use crate::world::Room;

/// Reorder rooms into reading order.
///
/// Rooms are sorted by `y`, then grouped into rows: a room joins the current
/// row while its `y` is within `row_tolerance` of the row's first room. Each
/// row is then sorted by `x`. Grouping first keeps the ordering total, which a
/// pairwise "close in y, so compare x" comparator would not be.
pub fn sequence_rooms(mut rooms: Vec<Room>, row_tolerance: i32) -> Vec<Room> {
    rooms.sort_by_key(|r| (r.y, r.x));

    let mut ordered = Vec::with_capacity(rooms.len());
    let mut row: Vec<Room> = Vec::new();
    let mut row_y = 0;

    for room in rooms {
        if !row.is_empty() && room.y - row_y > row_tolerance {
            flush_row(&mut row, &mut ordered);
        }
        if row.is_empty() {
            row_y = room.y;
        }
        row.push(room);
    }
    flush_row(&mut row, &mut ordered);

    ordered
}

fn flush_row(row: &mut Vec<Room>, ordered: &mut Vec<Room>) {
    row.sort_by_key(|r| (r.x, r.y));
    ordered.append(row);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn origins(rooms: &[Room]) -> Vec<(i32, i32)> {
        rooms.iter().map(|r| (r.x, r.y)).collect()
    }

    #[test]
    fn test_near_rows_sort_by_x() {
        let rooms = vec![
            Room::new(40, 4, 5, 5),
            Room::new(10, 7, 5, 5),
            Room::new(25, 2, 5, 5),
        ];
        let ordered = sequence_rooms(rooms, 5);
        assert_eq!(origins(&ordered), vec![(10, 7), (25, 2), (40, 4)]);
    }

    #[test]
    fn test_far_rows_sort_by_y() {
        let rooms = vec![
            Room::new(5, 30, 5, 5),
            Room::new(50, 2, 5, 5),
            Room::new(20, 15, 5, 5),
            Room::new(2, 3, 5, 5),
        ];
        let ordered = sequence_rooms(rooms, 5);
        assert_eq!(origins(&ordered), vec![(2, 3), (50, 2), (20, 15), (5, 30)]);
    }

    #[test]
    fn test_order_is_independent_of_input_order() {
        let rooms = vec![
            Room::new(30, 20, 4, 4),
            Room::new(3, 22, 4, 4),
            Room::new(60, 2, 4, 4),
            Room::new(12, 5, 4, 4),
            Room::new(45, 24, 4, 4),
        ];
        let mut reversed = rooms.clone();
        reversed.reverse();
        assert_eq!(sequence_rooms(rooms, 5), sequence_rooms(reversed, 5));
    }

    #[test]
    fn test_empty_and_single() {
        assert!(sequence_rooms(Vec::new(), 5).is_empty());
        assert_eq!(sequence_rooms(vec![Room::new(3, 3, 4, 4)], 5).len(), 1);
    }
}
