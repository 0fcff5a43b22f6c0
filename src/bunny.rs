//! Bundled low-poly bunny vertex data.
//!
//! Decimated `(position, normal)` table plus a triangle index table. The
//! mesh builder expands the indices into a flat vertex stream.

pub const BUNNY_VERTICES: [([f32; 3], [f32; 3]); 33] = [
    // Lower body ring
    ([0.350, -0.600, 0.000], [0.504, -0.864, 0.000]),
    ([0.175, -0.600, 0.303], [0.252, -0.864, 0.436]),
    ([-0.175, -0.600, 0.303], [-0.252, -0.864, 0.436]),
    ([-0.350, -0.600, 0.000], [-0.504, -0.864, 0.000]),
    ([-0.175, -0.600, -0.303], [-0.252, -0.864, -0.436]),
    ([0.175, -0.600, -0.303], [0.252, -0.864, -0.436]),
    // Belly ring
    ([0.550, -0.100, 0.000], [0.984, -0.179, 0.000]),
    ([0.275, -0.100, 0.476], [0.492, -0.179, 0.852]),
    ([-0.275, -0.100, 0.476], [-0.492, -0.179, 0.852]),
    ([-0.550, -0.100, 0.000], [-0.984, -0.179, 0.000]),
    ([-0.275, -0.100, -0.476], [-0.492, -0.179, -0.852]),
    ([0.275, -0.100, -0.476], [0.492, -0.179, -0.852]),
    // Shoulder ring
    ([0.300, 0.300, 0.000], [0.707, 0.707, 0.000]),
    ([0.150, 0.300, 0.260], [0.354, 0.707, 0.613]),
    ([-0.150, 0.300, 0.260], [-0.354, 0.707, 0.613]),
    ([-0.300, 0.300, 0.000], [-0.707, 0.707, 0.000]),
    ([-0.150, 0.300, -0.260], [-0.354, 0.707, -0.613]),
    ([0.150, 0.300, -0.260], [0.354, 0.707, -0.613]),
    // Head ring
    ([0.220, 0.550, 0.100], [0.910, 0.414, 0.000]),
    ([0.110, 0.550, 0.290], [0.456, 0.415, 0.788]),
    ([-0.110, 0.550, 0.290], [-0.456, 0.415, 0.788]),
    ([-0.220, 0.550, 0.100], [-0.910, 0.414, 0.000]),
    ([-0.110, 0.550, -0.090], [-0.456, 0.415, -0.788]),
    ([0.110, 0.550, -0.090], [0.456, 0.415, -0.788]),
    // Crown and base
    ([0.000, 0.750, 0.100], [0.000, 1.000, 0.000]),
    ([0.000, -0.680, 0.000], [0.000, -1.000, 0.000]),
    // Left ear
    ([-0.120, 0.720, 0.050], [-0.447, 0.775, 0.447]),
    ([-0.160, 1.050, 0.000], [-0.370, 0.920, 0.120]),
    ([-0.050, 0.720, 0.050], [0.196, 0.748, 0.634]),
    // Right ear
    ([0.120, 0.720, 0.050], [0.447, 0.775, 0.447]),
    ([0.160, 1.050, 0.000], [0.370, 0.920, 0.120]),
    ([0.050, 0.720, 0.050], [-0.196, 0.748, 0.634]),
    // Tail
    ([0.000, -0.150, -0.600], [0.000, -0.240, -0.971]),
];

pub const BUNNY_INDICES: [[u16; 3]; 54] = [
    // Base fan
    [25, 1, 0],
    [25, 2, 1],
    [25, 3, 2],
    [25, 4, 3],
    [25, 5, 4],
    [25, 0, 5],
    // Lower body to belly
    [0, 6, 7],
    [0, 7, 1],
    [1, 7, 8],
    [1, 8, 2],
    [2, 8, 9],
    [2, 9, 3],
    [3, 9, 10],
    [3, 10, 4],
    [4, 10, 11],
    [4, 11, 5],
    [5, 11, 6],
    [5, 6, 0],
    // Belly to shoulders
    [6, 12, 13],
    [6, 13, 7],
    [7, 13, 14],
    [7, 14, 8],
    [8, 14, 15],
    [8, 15, 9],
    [9, 15, 16],
    [9, 16, 10],
    [10, 16, 17],
    [10, 17, 11],
    [11, 17, 12],
    [11, 12, 6],
    // Shoulders to head
    [12, 18, 19],
    [12, 19, 13],
    [13, 19, 20],
    [13, 20, 14],
    [14, 20, 21],
    [14, 21, 15],
    [15, 21, 22],
    [15, 22, 16],
    [16, 22, 23],
    [16, 23, 17],
    [17, 23, 18],
    [17, 18, 12],
    // Crown fan
    [24, 19, 18],
    [24, 20, 19],
    [24, 21, 20],
    [24, 22, 21],
    [24, 23, 22],
    [24, 18, 23],
    // Ears (double-sided fins)
    [26, 27, 28],
    [28, 27, 26],
    [29, 31, 30],
    [30, 31, 29],
    // Tail (double-sided fin)
    [10, 32, 11],
    [11, 32, 10],
];
