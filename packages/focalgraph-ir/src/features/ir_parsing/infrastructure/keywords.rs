//! Keyword classes of the LLVM assembly grammar
//!
//! Only the classes the readers need to tell apart; an unknown keyword in a
//! flag position simply ends the flag run.

pub fn is_linkage(word: &str) -> bool {
    matches!(
        word,
        "private"
            | "internal"
            | "available_externally"
            | "linkonce"
            | "weak"
            | "common"
            | "appending"
            | "extern_weak"
            | "linkonce_odr"
            | "weak_odr"
            | "external"
    )
}

pub fn is_preemption(word: &str) -> bool {
    matches!(word, "dso_preemptable" | "dso_local")
}

pub fn is_visibility(word: &str) -> bool {
    matches!(word, "default" | "hidden" | "protected")
}

pub fn is_dll_storage_class(word: &str) -> bool {
    matches!(word, "dllimport" | "dllexport")
}

pub fn is_unnamed_addr(word: &str) -> bool {
    matches!(word, "unnamed_addr" | "local_unnamed_addr")
}

/// Named calling conventions; `cc <n>` is handled by the caller
pub fn is_calling_convention(word: &str) -> bool {
    matches!(
        word,
        "ccc"
            | "fastcc"
            | "coldcc"
            | "tailcc"
            | "webkit_jscc"
            | "anyregcc"
            | "preserve_mostcc"
            | "preserve_allcc"
            | "preserve_nonecc"
            | "cxx_fast_tlscc"
            | "swiftcc"
            | "swifttailcc"
            | "cfguard_checkcc"
            | "ghccc"
            | "hhvmcc"
            | "hhvm_ccc"
            | "x86_stdcallcc"
            | "x86_fastcallcc"
            | "x86_thiscallcc"
            | "x86_vectorcallcc"
            | "x86_regcallcc"
            | "x86_intrcc"
            | "x86_64_sysvcc"
            | "win64cc"
            | "arm_apcscc"
            | "arm_aapcscc"
            | "arm_aapcs_vfpcc"
            | "aarch64_vector_pcs"
            | "aarch64_sve_vector_pcs"
            | "msp430_intrcc"
            | "avr_intrcc"
            | "avr_signalcc"
            | "ptx_kernel"
            | "ptx_device"
            | "spir_func"
            | "spir_kernel"
            | "intel_ocl_bicc"
            | "amdgpu_kernel"
            | "amdgpu_vs"
            | "amdgpu_gs"
            | "amdgpu_ps"
            | "amdgpu_cs"
            | "amdgpu_hs"
            | "amdgpu_ls"
            | "amdgpu_es"
            | "cc"
    )
}

/// Parameter and return-value attributes
pub fn is_param_attribute(word: &str) -> bool {
    matches!(
        word,
        "zeroext"
            | "signext"
            | "noext"
            | "inreg"
            | "byval"
            | "byref"
            | "preallocated"
            | "inalloca"
            | "sret"
            | "elementtype"
            | "align"
            | "noalias"
            | "nocapture"
            | "nofree"
            | "nest"
            | "returned"
            | "nonnull"
            | "dereferenceable"
            | "dereferenceable_or_null"
            | "swiftself"
            | "swiftasync"
            | "swifterror"
            | "immarg"
            | "noundef"
            | "nofpclass"
            | "alignstack"
            | "allocalign"
            | "allocptr"
            | "readnone"
            | "readonly"
            | "writeonly"
            | "writable"
            | "dead_on_unwind"
            | "range"
            | "captures"
            | "initializes"
    )
}

/// Function attributes (keyword form; string attributes are handled separately)
pub fn is_function_attribute(word: &str) -> bool {
    matches!(
        word,
        "alignstack"
            | "allocsize"
            | "allockind"
            | "alwaysinline"
            | "builtin"
            | "cold"
            | "convergent"
            | "disable_sanitizer_instrumentation"
            | "fn_ret_thunk_extern"
            | "hot"
            | "inaccessiblememonly"
            | "inaccessiblemem_or_argmemonly"
            | "argmemonly"
            | "inlinehint"
            | "jumptable"
            | "minsize"
            | "mustprogress"
            | "naked"
            | "nobuiltin"
            | "nocallback"
            | "nocf_check"
            | "noduplicate"
            | "nofree"
            | "noimplicitfloat"
            | "noinline"
            | "nomerge"
            | "nonlazybind"
            | "noprofile"
            | "noredzone"
            | "noreturn"
            | "norecurse"
            | "nosanitize_bounds"
            | "nosanitize_coverage"
            | "nosync"
            | "nounwind"
            | "null_pointer_is_valid"
            | "optforfuzzing"
            | "optnone"
            | "optsize"
            | "presplitcoroutine"
            | "readnone"
            | "readonly"
            | "writeonly"
            | "returns_twice"
            | "safestack"
            | "sanitize_address"
            | "sanitize_hwaddress"
            | "sanitize_memory"
            | "sanitize_memtag"
            | "sanitize_thread"
            | "shadowcallstack"
            | "skipprofile"
            | "speculatable"
            | "speculative_load_hardening"
            | "ssp"
            | "sspreq"
            | "sspstrong"
            | "strictfp"
            | "uwtable"
            | "vscale_range"
            | "memory"
            | "willreturn"
    )
}

pub fn is_fast_math_flag(word: &str) -> bool {
    matches!(
        word,
        "nnan" | "ninf" | "nsz" | "arcp" | "contract" | "afn" | "reassoc" | "fast"
    )
}

/// Integer wrap / exactness flags
pub fn is_overflow_flag(word: &str) -> bool {
    matches!(word, "nuw" | "nsw" | "exact" | "disjoint" | "nneg" | "samesign")
}

pub fn is_tail_marker(word: &str) -> bool {
    matches!(word, "tail" | "musttail" | "notail")
}

pub fn is_atomic_ordering(word: &str) -> bool {
    matches!(
        word,
        "unordered" | "monotonic" | "acquire" | "release" | "acq_rel" | "seq_cst"
    )
}

pub fn is_icmp_predicate(word: &str) -> bool {
    matches!(
        word,
        "eq" | "ne" | "ugt" | "uge" | "ult" | "ule" | "sgt" | "sge" | "slt" | "sle"
    )
}

pub fn is_fcmp_predicate(word: &str) -> bool {
    matches!(
        word,
        "false"
            | "oeq"
            | "ogt"
            | "oge"
            | "olt"
            | "ole"
            | "one"
            | "ord"
            | "ueq"
            | "ugt"
            | "uge"
            | "ult"
            | "ule"
            | "une"
            | "uno"
            | "true"
    )
}

pub fn is_conversion_opcode(word: &str) -> bool {
    matches!(
        word,
        "trunc"
            | "zext"
            | "sext"
            | "fptrunc"
            | "fpext"
            | "fptoui"
            | "fptosi"
            | "uitofp"
            | "sitofp"
            | "ptrtoint"
            | "inttoptr"
            | "bitcast"
            | "addrspacecast"
    )
}

pub fn is_integer_binop(word: &str) -> bool {
    matches!(
        word,
        "add" | "sub" | "mul" | "udiv" | "sdiv" | "urem" | "srem"
    )
}

pub fn is_float_binop(word: &str) -> bool {
    matches!(word, "fadd" | "fsub" | "fmul" | "fdiv" | "frem")
}

pub fn is_bitwise_binop(word: &str) -> bool {
    matches!(word, "shl" | "lshr" | "ashr" | "and" | "or" | "xor")
}

/// Keywords that open a constant expression in value position
pub fn is_constant_expression(word: &str) -> bool {
    is_conversion_opcode(word)
        || is_integer_binop(word)
        || is_float_binop(word)
        || is_bitwise_binop(word)
        || matches!(
            word,
            "getelementptr"
                | "select"
                | "icmp"
                | "fcmp"
                | "fneg"
                | "extractelement"
                | "insertelement"
                | "shufflevector"
                | "extractvalue"
                | "insertvalue"
        )
}
