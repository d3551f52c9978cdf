//! CPU特性检测模块
//!
//! 运行时检测CPU支持的SIMD指令集和特性，结果在进程内缓存一次

use std::sync::OnceLock;

/// CPU特性标志
#[derive(Debug, Clone)]
pub struct CpuFeatures {
    // x86/x64特性
    pub sse2: bool,
    pub sse41: bool,
    pub avx: bool,
    pub avx2: bool,
    pub fma: bool,

    // ARM特性
    pub neon: bool,

    // 厂商信息
    pub vendor: CpuVendor,
    pub brand: String,
}

/// CPU厂商
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CpuVendor {
    Intel,
    Amd,
    AppleSilicon,
    Qualcomm,
    Other,
}

impl CpuFeatures {
    /// 检测当前CPU特性
    fn detect() -> Self {
        #[cfg(target_arch = "x86_64")]
        {
            Self::detect_x86_64()
        }

        #[cfg(target_arch = "aarch64")]
        {
            Self::detect_aarch64()
        }

        #[cfg(not(any(target_arch = "x86_64", target_arch = "aarch64")))]
        {
            Self::default()
        }
    }

    #[cfg(target_arch = "x86_64")]
    fn detect_x86_64() -> Self {
        Self {
            sse2: is_x86_feature_detected!("sse2"),
            sse41: is_x86_feature_detected!("sse4.1"),
            avx: is_x86_feature_detected!("avx"),
            avx2: is_x86_feature_detected!("avx2"),
            fma: is_x86_feature_detected!("fma"),
            neon: false,
            vendor: Self::detect_x86_vendor(),
            brand: Self::get_cpu_brand(),
        }
    }

    #[cfg(target_arch = "aarch64")]
    fn detect_aarch64() -> Self {
        let brand = Self::get_cpu_brand();
        Self {
            sse2: false,
            sse41: false,
            avx: false,
            avx2: false,
            fma: false,
            // ARM NEON在aarch64上是强制支持的
            neon: std::arch::is_aarch64_feature_detected!("neon"),
            vendor: Self::detect_arm_vendor(&brand),
            brand,
        }
    }

    #[cfg(target_arch = "x86_64")]
    fn detect_x86_vendor() -> CpuVendor {
        use std::arch::x86_64::__cpuid;

        // SAFETY: cpuid叶0在所有x86_64处理器上都可用
        let result = unsafe { __cpuid(0) };
        let mut vendor = Vec::with_capacity(12);
        vendor.extend_from_slice(&result.ebx.to_le_bytes());
        vendor.extend_from_slice(&result.edx.to_le_bytes());
        vendor.extend_from_slice(&result.ecx.to_le_bytes());

        match vendor.as_slice() {
            b"GenuineIntel" => CpuVendor::Intel,
            b"AuthenticAMD" => CpuVendor::Amd,
            _ => CpuVendor::Other,
        }
    }

    #[cfg(target_arch = "aarch64")]
    fn detect_arm_vendor(brand: &str) -> CpuVendor {
        // 通过品牌字符串推断厂商
        let brand = brand.to_lowercase();

        if brand.contains("apple") {
            CpuVendor::AppleSilicon
        } else if brand.contains("qualcomm") || brand.contains("snapdragon") {
            CpuVendor::Qualcomm
        } else {
            CpuVendor::Other
        }
    }

    fn get_cpu_brand() -> String {
        // 尝试从/proc/cpuinfo读取（Linux）
        #[cfg(target_os = "linux")]
        {
            if let Ok(content) = std::fs::read_to_string("/proc/cpuinfo") {
                for line in content.lines() {
                    if line.starts_with("model name") || line.starts_with("Hardware") {
                        if let Some(name) = line.split(':').nth(1) {
                            return name.trim().to_string();
                        }
                    }
                }
            }
        }

        // macOS可以使用sysctl
        #[cfg(target_os = "macos")]
        {
            use std::process::Command;
            if let Ok(output) = Command::new("sysctl")
                .arg("-n")
                .arg("machdep.cpu.brand_string")
                .output()
            {
                if let Ok(brand) = String::from_utf8(output.stdout) {
                    return brand.trim().to_string();
                }
            }
        }

        "Unknown".to_string()
    }

    /// 单行摘要，用于日志输出
    pub fn summary(&self) -> String {
        let mut flags = Vec::new();
        if self.sse2 {
            flags.push("sse2");
        }
        if self.sse41 {
            flags.push("sse4.1");
        }
        if self.avx {
            flags.push("avx");
        }
        if self.avx2 {
            flags.push("avx2");
        }
        if self.fma {
            flags.push("fma");
        }
        if self.neon {
            flags.push("neon");
        }
        if flags.is_empty() {
            flags.push("none");
        }
        format!("{:?} '{}' [{}]", self.vendor, self.brand, flags.join(", "))
    }
}

impl Default for CpuFeatures {
    fn default() -> Self {
        Self {
            sse2: false,
            sse41: false,
            avx: false,
            avx2: false,
            fma: false,
            neon: false,
            vendor: CpuVendor::Other,
            brand: "Unknown".to_string(),
        }
    }
}

/// 全局CPU特性缓存
static CPU_FEATURES: OnceLock<CpuFeatures> = OnceLock::new();

/// 检测CPU特性（缓存结果）
pub fn detect_cpu_features() -> &'static CpuFeatures {
    CPU_FEATURES.get_or_init(CpuFeatures::detect)
}

/// 打印CPU信息
pub fn print_cpu_info() {
    let features = detect_cpu_features();
    println!("=== CPU Information ===");
    println!("Vendor: {:?}", features.vendor);
    println!("Brand: {}", features.brand);

    #[cfg(target_arch = "x86_64")]
    {
        println!("x86/x64 Features:");
        println!("  SSE2: {}", features.sse2);
        println!("  SSE4.1: {}", features.sse41);
        println!("  AVX: {}", features.avx);
        println!("  AVX2: {}", features.avx2);
        println!("  FMA: {}", features.fma);
    }

    #[cfg(target_arch = "aarch64")]
    {
        println!("ARM Features:");
        println!("  NEON: {}", features.neon);
    }
}
