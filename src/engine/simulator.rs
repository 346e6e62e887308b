// ==========================================
// 耐材内衬设计计算系统 - 模拟编排器
// ==========================================
// 计算主流程:
//   校验 -> 几何布置 -> 热阻网络求解 -> 冻结前沿 -> 安全判定 -> 材料清单 -> 结果组装
// 红线: 纯同步计算，无共享可变状态，无 I/O
// 红线: 目录快照由调用方解析后传入，引擎不访问缓存
// ==========================================

mod core;


pub use core::LiningSimulator;
