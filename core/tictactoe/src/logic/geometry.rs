//! 格子幾何：邏輯位置 ↔ 世界座標
//!
//! 3x3 棋盤以中央格子（錨點）為原點。垂直軸固定為世界 y 軸，
//! 「右」軸依錨點朝向對應到世界 x 或 z 軸：
//!
//! | 朝向  | 右軸 |
//! |-------|------|
//! | North | +x   |
//! | South | -x   |
//! | East  | +z   |
//! | West  | -z   |
//!
//! 左欄一律為 -1、右欄一律為 +1，中列與上下列使用相同符號。

use crate::domain::core_types::{LogicalPosition, Offset, Orientation, WorldVector};
use crate::host::{SlotHandle, SlotHost, SlotId};

const ORIENTATIONS: [Orientation; 4] = [
    Orientation::North,
    Orientation::South,
    Orientation::East,
    Orientation::West,
];

const fn orientation_index(orientation: Orientation) -> usize {
    match orientation {
        Orientation::North => 0,
        Orientation::South => 1,
        Orientation::East => 2,
        Orientation::West => 3,
    }
}

/// 「右」軸在世界 (x, z) 上的單位向量
const fn right_axis(orientation: Orientation) -> (i32, i32) {
    match orientation {
        Orientation::North => (1, 0),
        Orientation::South => (-1, 0),
        Orientation::East => (0, 1),
        Orientation::West => (0, -1),
    }
}

const fn build_offset_table() -> [[Offset; 9]; 4] {
    let mut table = [[Offset { dx: 0, dy: 0, dz: 0 }; 9]; 4];
    let mut o = 0;
    while o < ORIENTATIONS.len() {
        let (rx, rz) = right_axis(ORIENTATIONS[o]);
        let mut p = 0;
        while p < LogicalPosition::ALL.len() {
            let position = LogicalPosition::ALL[p];
            let column = position.column().sign();
            table[o][p] = Offset {
                dx: rx * column,
                dy: position.row().sign(),
                dz: rz * column,
            };
            p += 1;
        }
        o += 1;
    }
    table
}

/// (朝向, 位置) → 位移，編譯期建表
pub const OFFSET_TABLE: [[Offset; 9]; 4] = build_offset_table();

/// 查表取得格子相對錨點的位移
pub fn cell_offset(orientation: Orientation, position: LogicalPosition) -> Offset {
    OFFSET_TABLE[orientation_index(orientation)][position.index()]
}

/// 讀取錨點格子目前的朝向
///
/// 每次呼叫都重新讀取，不快取；世界未載入或錨點格子消失時回傳 `None`。
pub fn anchor_orientation<S>(anchor: &WorldVector, slots: &S) -> Option<Orientation>
where
    S: SlotHost + ?Sized,
{
    if !slots.has_world(&anchor.world) {
        return None;
    }
    let center = slots.slot_at(anchor)?;
    slots.orientation(center.id)
}

/// 找出棋盤某個位置對應的格子實體
pub fn resolve_cell<S>(
    anchor: &WorldVector,
    position: LogicalPosition,
    slots: &S,
) -> Option<SlotHandle>
where
    S: SlotHost + ?Sized,
{
    let orientation = anchor_orientation(anchor, slots)?;
    let target = anchor.offset(cell_offset(orientation, position));
    slots.slot_at(&target)
}

/// 反查格子實體在棋盤上的位置（窮舉九格）
pub fn position_of<S>(anchor: &WorldVector, slot: SlotId, slots: &S) -> Option<LogicalPosition>
where
    S: SlotHost + ?Sized,
{
    LogicalPosition::ALL.into_iter().find(|&position| {
        resolve_cell(anchor, position, slots).is_some_and(|handle| handle.id == slot)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use strum::IntoEnumIterator;

    fn offset(dx: i32, dy: i32, dz: i32) -> Offset {
        Offset { dx, dy, dz }
    }

    #[test]
    fn test_center_is_origin() {
        for orientation in Orientation::iter() {
            assert_eq!(
                cell_offset(orientation, LogicalPosition::Center),
                offset(0, 0, 0),
                "{orientation} 的中央位移"
            );
        }
    }

    #[test]
    fn test_middle_column_is_orientation_independent() {
        for orientation in Orientation::iter() {
            assert_eq!(
                cell_offset(orientation, LogicalPosition::TopMiddle),
                offset(0, 1, 0)
            );
            assert_eq!(
                cell_offset(orientation, LogicalPosition::BottomMiddle),
                offset(0, -1, 0)
            );
        }
    }

    #[test]
    fn test_corner_offsets_per_orientation() {
        let test_data = [
            (Orientation::North, offset(-1, 1, 0), offset(1, -1, 0)),
            (Orientation::South, offset(1, 1, 0), offset(-1, -1, 0)),
            (Orientation::East, offset(0, 1, -1), offset(0, -1, 1)),
            (Orientation::West, offset(0, 1, 1), offset(0, -1, -1)),
        ];
        for (orientation, top_left, bottom_right) in test_data {
            assert_eq!(
                cell_offset(orientation, LogicalPosition::TopLeft),
                top_left,
                "{orientation} 左上"
            );
            assert_eq!(
                cell_offset(orientation, LogicalPosition::BottomRight),
                bottom_right,
                "{orientation} 右下"
            );
        }
    }

    #[test]
    fn test_left_column_mirrors_right_column() {
        for orientation in Orientation::iter() {
            for (left, right) in [
                (LogicalPosition::TopLeft, LogicalPosition::TopRight),
                (LogicalPosition::MiddleLeft, LogicalPosition::MiddleRight),
                (LogicalPosition::BottomLeft, LogicalPosition::BottomRight),
            ] {
                let l = cell_offset(orientation, left);
                let r = cell_offset(orientation, right);
                assert_eq!(l.dx, -r.dx);
                assert_eq!(l.dz, -r.dz);
                assert_eq!(l.dy, r.dy);
            }
        }
    }

    #[test]
    fn test_offsets_are_distinct_and_planar() {
        for orientation in Orientation::iter() {
            let offsets: HashSet<Offset> = LogicalPosition::ALL
                .into_iter()
                .map(|p| cell_offset(orientation, p))
                .collect();
            assert_eq!(offsets.len(), 9, "{orientation} 應有九個不同位移");

            // 棋盤是一面牆：North/South 的 z 不變，East/West 的 x 不變
            for o in &offsets {
                match orientation {
                    Orientation::North | Orientation::South => assert_eq!(o.dz, 0),
                    Orientation::East | Orientation::West => assert_eq!(o.dx, 0),
                }
            }
        }
    }
}
