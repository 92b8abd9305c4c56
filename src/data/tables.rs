//! Benchmark results for the three copy strategies, as measured.
//!
//! Each row is keyed by the fixed-variable value and lists one sample per
//! free-variable value in canonical order. Rows are validated by
//! [`MeasurementTable::load`](super::MeasurementTable::load) before use.

use super::{RawTable, Strategy};

/// CPU cycles per byte; rows keyed by thread count, samples per message size.
pub const CYCLES_PER_BYTE: RawTable = &[
    (
        Strategy::TwoCopy,
        &[
            (1, &[15334655.465625, 3080080.6521484377, 1529750.9689453125, 393239.0876708984]),
            (2, &[9076736.035546875, 2429070.119042969, 1252781.7425292968, 314529.3873657227]),
            (4, &[7653557.527734375, 1926191.2646972656, 965561.8845458984, 245084.02803344728]),
            (8, &[5917618.3640625, 1447180.3382324218, 729572.9404052735, 184931.03284912108]),
        ],
    ),
    (
        Strategy::OneCopy,
        &[
            (1, &[16211882.43125, 3195281.6955078123, 1601059.655078125, 408160.13186035154]),
            (2, &[9875100.371484375, 2563633.9357421873, 1291311.951220703, 317636.4027832031]),
            (4, &[7933292.2783203125, 1983442.1498535157, 993479.5411376953, 250943.77531738282]),
            (8, &[6064362.389257813, 1484344.9203613282, 757194.0787963867, 189021.22482910156]),
        ],
    ),
    (
        Strategy::ZeroCopy,
        &[
            (1, &[15279225.1734375, 3207343.0443359376, 1603676.8663085937, 402516.4403320312]),
            (2, &[10048702.289453125, 2520274.549121094, 1265971.702001953, 324690.3137207031]),
            (4, &[7890813.145898437, 1982327.1212890625, 995552.3055908203, 250693.31728515626]),
            (8, &[5962638.28828125, 1520611.0869384767, 760846.1693481446, 189473.7475402832]),
        ],
    ),
];

/// Cache misses; rows keyed by thread count, samples per message size.
pub const CACHE_MISSES: RawTable = &[
    (
        Strategy::TwoCopy,
        &[
            (1, &[107219.0, 106700.0, 97806.0, 102821.0]),
            (2, &[346419.0, 217883.0, 229812.0, 141078.0]),
            (4, &[238685.0, 269616.0, 289266.0, 385535.0]),
            (8, &[286539.0, 208377.0, 250563.0, 238552.0]),
        ],
    ),
    (
        Strategy::OneCopy,
        &[
            (1, &[115070.0, 115127.0, 77705.0, 106093.0]),
            (2, &[148972.0, 232640.0, 167781.0, 147285.0]),
            (4, &[205132.0, 255603.0, 252697.0, 322010.0]),
            (8, &[212370.0, 223984.0, 200958.0, 201646.0]),
        ],
    ),
    (
        Strategy::ZeroCopy,
        &[
            (1, &[141916.0, 109552.0, 98646.0, 100333.0]),
            (2, &[150452.0, 209518.0, 178890.0, 164661.0]),
            (4, &[255476.0, 227507.0, 240896.0, 314653.0]),
            (8, &[243738.0, 245050.0, 213396.0, 217562.0]),
        ],
    ),
];

/// Latency in microseconds; rows keyed by message size, samples per thread count.
pub const LATENCY_US: RawTable = &[
    (
        Strategy::TwoCopy,
        &[
            (128, &[966781.678, 498905.83, 249028.484, 137185.773]),
            (512, &[995608.632, 498985.451, 249426.998, 124491.427]),
            (1024, &[995986.857, 499012.047, 249426.582, 137002.518]),
            (4096, &[997431.681, 498606.587, 249406.535, 137164.701]),
        ],
    ),
    (
        Strategy::OneCopy,
        &[
            (128, &[998199.001, 498752.266, 249029.239, 124732.743]),
            (512, &[998064.951, 498771.721, 248952.782, 124635.482]),
            (1024, &[996800.75, 498869.486, 249280.127, 137196.52]),
            (4096, &[997912.541, 498053.331, 249337.548, 137222.225]),
        ],
    ),
    (
        Strategy::ZeroCopy,
        &[
            (128, &[998119.985, 498506.949, 248977.717, 124543.21]),
            (512, &[997973.264, 498901.948, 249103.656, 137118.722]),
            (1024, &[997866.436, 498820.674, 249003.115, 137001.523]),
            (4096, &[997938.78, 498837.172, 249337.812, 137205.775]),
        ],
    ),
];

/// Throughput in Gbps; rows keyed by thread count, samples per message size.
pub const THROUGHPUT_GBPS: RawTable = &[
    (
        Strategy::TwoCopy,
        &[
            (1, &[0.000001, 0.000004, 0.000008, 0.000033]),
            (2, &[0.000002, 0.000008, 0.000016, 0.000066]),
            (4, &[0.000004, 0.000016, 0.000033, 0.000131]),
            (8, &[0.000007, 0.000033, 0.000060, 0.000239]),
        ],
    ),
    (
        Strategy::OneCopy,
        &[
            (1, &[0.000001, 0.000004, 0.000008, 0.000033]),
            (2, &[0.000002, 0.000008, 0.000016, 0.000066]),
            (4, &[0.000004, 0.000016, 0.000033, 0.000131]),
            (8, &[0.000008, 0.000033, 0.000060, 0.000239]),
        ],
    ),
    (
        Strategy::ZeroCopy,
        &[
            (1, &[0.000001, 0.000004, 0.000008, 0.000033]),
            (2, &[0.000002, 0.000008, 0.000016, 0.000066]),
            (4, &[0.000004, 0.000016, 0.000033, 0.000131]),
            (8, &[0.000008, 0.000030, 0.000060, 0.000239]),
        ],
    ),
];
